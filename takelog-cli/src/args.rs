use std::path::PathBuf;

use takelog_core::interchange::ExportFormat;
use takelog_types::{CutNo, Numbered, TakeNo, TakeStatus, MIC_CHANNELS};

pub const USAGE: &str = "\
usage: takelog [--db <path>] [--verbose] <command>

commands:
  projects                          list projects (* = current)
  new <name>                        create a project and switch to it
  use <project-id>                  switch project
  rename <project-id> <name>        rename a project
  drop <project-id>                 delete a project (not the last one)
  list [--status OK|NG|KEEP] [query]
  log [--file F] [--scene S] [--cut C] [--take T] [--status X]
      [--mic N=label]... [--note text]
  remove <take-id>
  export csv|json [path]
  import <path>                     .json imports a project, anything else CSV";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogArgs {
    pub file_no: Option<String>,
    pub scene: Option<Numbered>,
    pub cut: Option<CutNo>,
    pub take: Option<TakeNo>,
    pub status: Option<TakeStatus>,
    /// Zero-based channel and label.
    pub mics: Vec<(usize, String)>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Projects,
    New(String),
    Use(String),
    Rename(String, String),
    Drop(String),
    List { status: Option<TakeStatus>, query: String },
    Log(LogArgs),
    Remove(String),
    Export { format: ExportFormat, path: Option<PathBuf> },
    Import(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub db: Option<PathBuf>,
    pub verbose: bool,
    pub command: Command,
}

/// Parse everything after the program name.
pub fn parse(args: &[String]) -> Result<Cli, String> {
    let mut db = None;
    let mut verbose = false;
    let mut rest = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--db" => db = Some(PathBuf::from(value(&mut iter, "--db")?)),
            "--verbose" | "-v" => verbose = true,
            _ => rest.push(arg.clone()),
        }
    }

    let (name, tail) = rest.split_first().ok_or("missing command")?;
    let command = match name.as_str() {
        "projects" => Command::Projects,
        "new" => Command::New(joined(tail, "project name")?),
        "use" => Command::Use(single(tail, "project id")?),
        "rename" => match tail {
            [id, name @ ..] if !name.is_empty() => Command::Rename(id.clone(), name.join(" ")),
            _ => return Err("rename needs a project id and a name".into()),
        },
        "drop" => Command::Drop(single(tail, "project id")?),
        "list" => parse_list(tail)?,
        "log" => Command::Log(parse_log(tail)?),
        "remove" => Command::Remove(single(tail, "take id")?),
        "export" => parse_export(tail)?,
        "import" => Command::Import(PathBuf::from(single(tail, "file path")?)),
        other => return Err(format!("unknown command `{}`", other)),
    };
    Ok(Cli { db, verbose, command })
}

fn value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<String, String> {
    iter.next().cloned().ok_or_else(|| format!("{} needs a value", flag))
}

fn single(tail: &[String], what: &str) -> Result<String, String> {
    match tail {
        [one] => Ok(one.clone()),
        [] => Err(format!("missing {}", what)),
        _ => Err(format!("expected a single {}", what)),
    }
}

fn joined(tail: &[String], what: &str) -> Result<String, String> {
    if tail.is_empty() {
        return Err(format!("missing {}", what));
    }
    Ok(tail.join(" "))
}

fn parse_status(s: &str) -> Result<TakeStatus, String> {
    TakeStatus::parse(s).ok_or_else(|| format!("unknown status `{}` (OK, NG or KEEP)", s))
}

fn parse_list(tail: &[String]) -> Result<Command, String> {
    let mut status = None;
    let mut words = Vec::new();
    let mut iter = tail.iter();
    while let Some(arg) = iter.next() {
        if arg == "--status" {
            status = Some(parse_status(&value(&mut iter, "--status")?)?);
        } else {
            words.push(arg.as_str());
        }
    }
    Ok(Command::List { status, query: words.join(" ") })
}

fn parse_log(tail: &[String]) -> Result<LogArgs, String> {
    let mut log = LogArgs::default();
    let mut iter = tail.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--file" => log.file_no = Some(value(&mut iter, "--file")?),
            "--scene" => log.scene = Some(Numbered::parse(&value(&mut iter, "--scene")?)),
            "--cut" => log.cut = Some(CutNo::parse(&value(&mut iter, "--cut")?)),
            "--take" => log.take = Some(TakeNo::parse(&value(&mut iter, "--take")?)),
            "--status" => log.status = Some(parse_status(&value(&mut iter, "--status")?)?),
            "--note" => log.note = Some(value(&mut iter, "--note")?),
            "--mic" => log.mics.push(parse_mic(&value(&mut iter, "--mic")?)?),
            other => return Err(format!("unexpected log argument `{}`", other)),
        }
    }
    Ok(log)
}

/// `N=label` with N counted from 1.
fn parse_mic(arg: &str) -> Result<(usize, String), String> {
    let (n, label) = arg.split_once('=').ok_or_else(|| format!("--mic expects N=label, got `{}`", arg))?;
    match n.trim().parse::<usize>() {
        Ok(n) if (1..=MIC_CHANNELS).contains(&n) => Ok((n - 1, label.to_string())),
        _ => Err(format!("mic channel must be 1..={}", MIC_CHANNELS)),
    }
}

fn parse_export(tail: &[String]) -> Result<Command, String> {
    let (format, path) = match tail {
        [f] => (f, None),
        [f, p] => (f, Some(PathBuf::from(p))),
        _ => return Err("export needs csv|json and an optional path".into()),
    };
    let format = match format.to_ascii_lowercase().as_str() {
        "csv" => ExportFormat::Csv,
        "json" => ExportFormat::Json,
        other => return Err(format!("unknown export format `{}`", other)),
    };
    Ok(Command::Export { format, path })
}
