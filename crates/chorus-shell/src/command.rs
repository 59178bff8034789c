//! Navigation script language. One command per line; `#` starts a comment.
//!
//! ```text
//! open-session s1 ws-main
//! open-webapp jupyter
//! activate s1
//! close jupyter
//! capacity 3
//! list
//! webapps
//! clear
//! ```

use chorus_common::IframeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenSession { id: IframeId, workspace_id: String },
    OpenWebapp { id: IframeId },
    Activate { id: IframeId },
    Close { id: IframeId },
    Capacity(usize),
    List,
    Webapps,
    Clear,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    Arity {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid capacity `{0}`")]
    Capacity(String),
}

impl Command {
    /// Parse one script line. Blank and comment lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.split('#').next().unwrap_or_default().trim();
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match (name, args) {
            ("open-session", [id, ws]) => Self::OpenSession {
                id: IframeId::from(*id),
                workspace_id: ws.to_string(),
            },
            ("open-session", _) => {
                return Err(ParseError::Arity {
                    command: "open-session",
                    expected: "<session-id> <workspace-id>",
                })
            }
            ("open-webapp", [id]) => Self::OpenWebapp {
                id: IframeId::from(*id),
            },
            ("activate", [id]) => Self::Activate {
                id: IframeId::from(*id),
            },
            ("close", [id]) => Self::Close {
                id: IframeId::from(*id),
            },
            ("open-webapp" | "activate" | "close", _) => {
                return Err(ParseError::Arity {
                    command: single_arg_name(name),
                    expected: "<id>",
                })
            }
            ("capacity", [n]) => match n.parse::<usize>() {
                Ok(n) => Self::Capacity(n),
                Err(_) => return Err(ParseError::Capacity(n.to_string())),
            },
            ("capacity", _) => {
                return Err(ParseError::Arity {
                    command: "capacity",
                    expected: "<n>",
                })
            }
            ("list", []) => Self::List,
            ("webapps", []) => Self::Webapps,
            ("clear", []) => Self::Clear,
            ("list" | "webapps" | "clear", _) => {
                return Err(ParseError::Arity {
                    command: no_arg_name(name),
                    expected: "no arguments",
                })
            }
            (other, _) => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn single_arg_name(name: &str) -> &'static str {
    match name {
        "open-webapp" => "open-webapp",
        "activate" => "activate",
        _ => "close",
    }
}

fn no_arg_name(name: &str) -> &'static str {
    match name {
        "list" => "list",
        "webapps" => "webapps",
        _ => "clear",
    }
}
