//! Key script tokens.
//!
//! A token is a short name (`h`, `l`, `m`, `up`, `down`), a key code
//! (`KeyH`, `ArrowUp`), or a decimal legacy key code (`72`). Prefixing
//! `@<id>:` sends the key from the element with that id.

use anyhow::{Error, anyhow};
use core::fmt;

/// How a scripted key identifies itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeySpec {
    Code(String),
    Legacy(u32),
}

/// One scripted keydown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptKey {
    pub key: KeySpec,
    /// Id of the element the key is sent from.
    pub from_id: Option<String>,
}

impl fmt::Display for ScriptKey {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(from_id) = &self.from_id {
            write!(fmt, "@{from_id}:")?;
        }
        match &self.key {
            KeySpec::Code(code) => fmt.write_str(code),
            KeySpec::Legacy(key_code) => write!(fmt, "{key_code}"),
        }
    }
}

pub fn parse_token(token: &str) -> Result<ScriptKey, Error> {
    let token = token.trim();
    if let Some(rest) = token.strip_prefix('@') {
        let (from_id, key) = rest
            .split_once(':')
            .ok_or_else(|| anyhow!("expected @<id>:<key>, got {token:?}"))?;
        if from_id.is_empty() {
            return Err(anyhow!("missing element id in {token:?}"));
        }
        return Ok(ScriptKey {
            key: parse_key(key)?,
            from_id: Some(from_id.to_owned()),
        });
    }
    Ok(ScriptKey {
        key: parse_key(token)?,
        from_id: None,
    })
}

fn parse_key(key: &str) -> Result<KeySpec, Error> {
    let short = match key.to_ascii_lowercase().as_str() {
        "h" => Some("KeyH"),
        "l" => Some("KeyL"),
        "m" => Some("KeyM"),
        "up" => Some("ArrowUp"),
        "down" => Some("ArrowDown"),
        _ => None,
    };
    if let Some(code) = short {
        return Ok(KeySpec::Code(code.to_owned()));
    }
    if key.starts_with("Key") || key.starts_with("Arrow") {
        return Ok(KeySpec::Code(key.to_owned()));
    }
    if !key.is_empty() && key.bytes().all(|byte| byte.is_ascii_digit()) {
        return key
            .parse::<u32>()
            .map(KeySpec::Legacy)
            .map_err(|err| anyhow!("bad key code {key:?}: {err}"));
    }
    Err(anyhow!("unknown key {key:?}"))
}

/// Parse a script read line by line. Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<ScriptKey>, Error> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_token)
        .collect()
}
