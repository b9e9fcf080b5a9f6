use std::env;
use std::ffi::OsStr;

use anyhow::Context as _;
use log::info;
use seahorse::{App, Command, Context, Flag, FlagType};

use notebook_tex::input::{Config, ConfigBuilder};
use notebook_tex::latex_generator::{CodeListing, DelimitedTable};
use notebook_tex::time::RunDate;

fn set_env_if_absent<K: AsRef<OsStr>, V: AsRef<OsStr>>(var: K, default: impl FnOnce() -> V) {
    if env::var(var.as_ref()).is_err() {
        env::set_var(var, default());
    }
}

fn main() {
    set_env_if_absent("RUST_APP_LOG", || "info");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");

    run();
}

mod seahorse_exts {
    use core::fmt;
    use std::path::PathBuf;

    use log::error;
    use seahorse::Context;

    /// Logs the error with its context chain and exits with status 1.
    pub fn exit_on_error<E: fmt::Debug>(result: Result<(), E>) {
        if let Err(e) = result {
            error!("{:?}", e);
            ::std::process::exit(1);
        }
    }

    pub trait ContextExt {
        fn context(&self) -> &Context;

        fn optional_string_flag(&self, name: &str) -> Option<String> {
            self.context().string_flag(name).ok()
        }

        fn optional_path_flag(&self, name: &str) -> Option<PathBuf> {
            self.optional_string_flag(name).map(PathBuf::from)
        }

        fn required_path_flag(&self, name: &str) -> Result<PathBuf, anyhow::Error> {
            self.optional_path_flag(name)
                .ok_or_else(|| anyhow::anyhow!("missing required flag \"{}\"", name))
        }
    }

    impl ContextExt for Context {
        fn context(&self) -> &Context {
            self
        }
    }
}

use seahorse_exts::{exit_on_error, ContextExt};

fn config_flags(command: Command) -> Command {
    command
        .flag(
            Flag::new("config", FlagType::String)
                .description("[optional] Path to a settings file (TOML)."),
        )
        .flag(
            Flag::new("current", FlagType::String)
                .description("[optional] Path to the current snapshot."),
        )
}

fn make_config_builder(context: &Context) -> anyhow::Result<ConfigBuilder> {
    let mut builder = match context.optional_path_flag("config") {
        Some(path) => Config::try_from_toml_file(path)?,
        None => Config::builder(),
    };

    if let Some(current) = context.optional_path_flag("current") {
        builder.current(current);
    }

    Ok(builder)
}

fn changes(context: &Context) -> anyhow::Result<()> {
    let mut builder = make_config_builder(context)?;

    if let Some(input) = context.optional_path_flag("input") {
        builder.input(input);
    }

    if let Some(previous) = context.optional_path_flag("previous") {
        builder.previous(previous);
    }

    if let Some(output) = context.optional_path_flag("output") {
        builder.output(output);
    }

    if let Some(date) = context.optional_string_flag("date") {
        builder.date(
            date.parse::<RunDate>()
                .with_context(|| format!("invalid value for flag \"date\": {}", date))?,
        );
    }

    let config = builder.build()?;

    if notebook_tex::generate_project_changes(&config)? {
        info!("updated `{}`", config.output().display());
    }

    Ok(())
}

fn seed(context: &Context) -> anyhow::Result<()> {
    let config = make_config_builder(context)?.build()?;

    notebook_tex::seed_snapshot(&config)?;

    Ok(())
}

fn listing(context: &Context) -> anyhow::Result<()> {
    let source = context.required_path_flag("source")?;
    let output = context.required_path_flag("output")?;

    let listing = context
        .optional_string_flag("language")
        .map_or_else(CodeListing::default, CodeListing::new);
    let extension = context.optional_string_flag("extension");

    notebook_tex::generate_code_listing(&source, &output, &listing, extension.as_deref())
}

fn table(context: &Context) -> anyhow::Result<()> {
    let [input, output, delimiter, widths @ ..] = context.args.as_slice() else {
        return Err(anyhow::anyhow!(
            "expected <input> <output> <delimiter> [<width>...]"
        ));
    };

    let widths = widths
        .iter()
        .map(|width| {
            width
                .parse::<u32>()
                .with_context(|| format!("invalid column width \"{}\"", width))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let table = DelimitedTable::new(delimiter.as_str(), widths);

    notebook_tex::generate_table(input, output, &table)
}

fn run() {
    let args: Vec<String> = env::args().collect();

    let changes_command = config_flags(Command::new("changes"))
        .usage(format!("{} changes [args]", args[0]))
        .description(
            "Snapshots the project export and appends the rows that changed since the last run.",
        )
        .flag(
            Flag::new("input", FlagType::String)
                .description("[optional] Path to the project export (JSON)."),
        )
        .flag(
            Flag::new("previous", FlagType::String)
                .description("[optional] Where the last snapshot is kept while diffing."),
        )
        .flag(
            Flag::new("output", FlagType::String)
                .description("[optional] Path to the document the changes are appended to."),
        )
        .flag(
            Flag::new("date", FlagType::String)
                .description("[optional] Date of the section as YYYY-MM-DD. Default: today"),
        )
        .action(|context: &Context| exit_on_error(changes(context)));

    let seed_command = config_flags(Command::new("seed"))
        .usage(format!("{} seed [args]", args[0]))
        .description("Creates an empty current snapshot, needed before the first `changes` run.")
        .action(|context: &Context| exit_on_error(seed(context)));

    let listing_command = Command::new("listing")
        .usage(format!("{} listing [args]", args[0]))
        .description("Includes every file of a directory as a code listing.")
        .flag(
            Flag::new("source", FlagType::String)
                .description("Path to the directory with the source files."),
        )
        .flag(Flag::new("output", FlagType::String).description("Path to the LaTeX file."))
        .flag(
            Flag::new("language", FlagType::String)
                .description("[optional] Language of the listings. Default: Rust"),
        )
        .flag(
            Flag::new("extension", FlagType::String)
                .description("[optional] Only list files with this extension."),
        )
        .action(|context: &Context| exit_on_error(listing(context)));

    let table_command = Command::new("table")
        .usage(format!(
            "{} table <input> <output> <delimiter> [<width>...]",
            args[0]
        ))
        .description("Turns a delimited file into a LaTeX table, widths are in pt.")
        .action(|context: &Context| exit_on_error(table(context)));

    let app = App::new(env!("CARGO_PKG_NAME"))
        .description(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .usage(format!("{} [args]", args[0]))
        .command(changes_command)
        .command(seed_command)
        .command(listing_command)
        .command(table_command);

    app.run(args);
}
