use anyhow::{Error, anyhow};
use log::{error, info};
use pagenav::{PagenavConfig, ScriptKey, parse_script, parse_token, replay};
use std::env;
use std::fs;
use std::io::{self, Read as _, Write as _};
use std::process::ExitCode;

const USAGE: &str = "usage: pagenav <file.html> [KEY ...]";

pub fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    let config = PagenavConfig::from_env();
    let mut args = env::args().skip(1);
    let path = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let tokens: Vec<String> = args.collect();

    let keys: Vec<ScriptKey> = if tokens.is_empty() {
        let mut script = String::new();
        io::stdin().read_to_string(&mut script)?;
        parse_script(&script)?
    } else {
        tokens
            .iter()
            .map(|token| parse_token(token))
            .collect::<Result<_, _>>()?
    };

    let source = fs::read_to_string(&path).map_err(|err| anyhow!("cannot read {path}: {err}"))?;
    let doc = html::parse_html(&source);
    info!("loaded {path}; replaying {} key(s)", keys.len());

    let (doc, reports) = replay(doc, &keys)?;

    let mut out = io::stdout().lock();
    for report in &reports {
        if config.json_output {
            writeln!(out, "{}", report.to_json()?)?;
        } else {
            writeln!(out, "{}", report.to_line())?;
        }
    }
    if config.dump_dom {
        if config.json_output {
            writeln!(out, "{}", doc.to_json_string())?;
        } else {
            write!(out, "{doc:?}")?;
        }
    }
    out.flush()?;
    Ok(())
}
