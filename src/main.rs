use std::{
    env,
    io::{self, Read, Write},
};

use color_eyre::{Section, eyre::eyre};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use webhelpers::{
    converters::{markdown, textilize},
    html::{Attrs, escape},
    number::format_byte_size,
    text::{LinkMode, auto_link, simple_format, strip_links, truncate},
};

const USAGE: &str = "\
usage: webhelpers <command> [args] < input

commands:
  escape            escape HTML special characters
  markdown          render Markdown
  textile           render Textile
  auto-link         link URLs and e-mail addresses
  simple-format     wrap paragraphs and break lines
  strip-links       remove <a> tags, keeping their text
  truncate <N>      shorten to N characters
  size <BYTES>      human-readable data size (no input read)";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        println!("{USAGE}");
        return Ok(());
    };
    debug!(%command, "running");

    let output = match command.as_str() {
        "size" => {
            let bytes = number_arg(rest, "size")?;
            format_byte_size(bytes, 1, false, false)
        }
        "truncate" => {
            let length = number_arg(rest, "truncate")?;
            truncate(&read_input()?, length, "...")
        }
        "escape" => escape(&read_input()?).into_string(),
        "markdown" => markdown(&read_input()?).into_string(),
        "textile" => textilize(&read_input()?).into_string(),
        "auto-link" => auto_link(read_input()?, LinkMode::All, &Attrs::new()).into_string(),
        "simple-format" => simple_format(read_input()?).into_string(),
        "strip-links" => strip_links(&read_input()?),
        "help" | "-h" | "--help" => USAGE.to_string(),
        other => {
            return Err(eyre!("unknown command {other:?}").with_note(|| USAGE));
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").with_note(|| "While writing the output")?;
    Ok(())
}

fn read_input() -> color_eyre::Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .with_note(|| "While reading standard input")?;
    Ok(input)
}

fn number_arg<T>(args: &[String], command: &str) -> color_eyre::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args
        .first()
        .ok_or_else(|| eyre!("{command} needs a numeric argument"))?;
    raw.parse()
        .map_err(|e| eyre!("{command}: {raw:?} is not a number: {e}"))
}
