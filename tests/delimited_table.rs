//! Tests the conversion of delimited files into LaTeX tables.

use std::fs;

use notebook_tex::generate_table;
use notebook_tex::latex_generator::DelimitedTable;
use tempfile::TempDir;

use pretty_assertions::assert_eq;

#[test]
fn test_convert_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("commits.csv");
    let output = dir.path().join("appendix/commits.tex");
    fs::write(&input, "Hash|Message\nabc123|Fix #4\n").unwrap();

    generate_table(&input, &output, &DelimitedTable::new("|", vec![50, 200])).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        concat!(
            "\\begin{center}\n",
            "\\begin{longtable}{|p{50pt}|p{200pt}|}\n",
            "\\hline\n",
            "Hash & Message \\\\\n",
            "\\hline\n",
            "abc123 & Fix \\#4 \\\\\n",
            "\\hline\n",
            "\\end{longtable}\n",
            "\\end{center}\n",
        )
    );
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();

    let result = generate_table(
        dir.path().join("missing.csv"),
        dir.path().join("out.tex"),
        &DelimitedTable::new(",", vec![]),
    );

    assert!(result.is_err());
    assert!(!dir.path().join("out.tex").exists());
}
