//! The built-in address-book command set.
//!
//! Each constructor only checks the *shape* of a bare command (how many
//! parameters, which markers, which options) and packs it into a
//! [`BuiltinCommand`]. Nothing here executes a command.

use serde::Serialize;

use super::binding::{Binding, BindingTable, ValidationError};
use crate::command::{BareCommand, Parameter, ParameterKind};

/// A fully-resolved command from the built-in set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum BuiltinCommand {
    /// Add a contact.
    Add {
        /// Contact name.
        name: String,
        /// Phone number, if given.
        #[serde(skip_serializing_if = "Option::is_none")]
        phone: Option<String>,
        /// E-mail address, if given.
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        /// Tags to attach.
        tags: Vec<String>,
    },
    /// Remove every contact.
    Clear,
    /// Delete the contact at a 1-based index.
    Delete {
        /// 1-based index into the displayed list.
        index: usize,
    },
    /// Change fields and tags of the contact at a 1-based index.
    Edit {
        /// 1-based index into the displayed list.
        index: usize,
        /// New name.
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// New phone number.
        #[serde(skip_serializing_if = "Option::is_none")]
        phone: Option<String>,
        /// New e-mail address.
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        /// Tags given as `+tag`.
        added_tags: Vec<String>,
        /// Tags given as `-tag`.
        removed_tags: Vec<String>,
    },
    /// Leave the application.
    Exit,
    /// Find contacts whose name contains any keyword.
    Find {
        /// Search keywords.
        keywords: Vec<String>,
    },
    /// Show usage, optionally for one command.
    Help {
        /// Command to describe.
        #[serde(skip_serializing_if = "Option::is_none")]
        topic: Option<String>,
    },
    /// Show every contact.
    List,
    /// Attach tags to the contact at a 1-based index.
    Tag {
        /// 1-based index into the displayed list.
        index: usize,
        /// Tags to attach.
        tags: Vec<String>,
    },
    /// Detach tags from the contact at a 1-based index.
    Untag {
        /// 1-based index into the displayed list.
        index: usize,
        /// Tags to detach.
        tags: Vec<String>,
    },
}

static BUILTIN_BINDINGS: [Binding<BuiltinCommand>; 10] = [
    Binding::new(ADD, add),
    Binding::new(CLEAR, clear),
    Binding::new(DELETE, delete),
    Binding::new(EDIT, edit),
    Binding::new(EXIT, exit),
    Binding::new(FIND, find),
    Binding::new(HELP, help),
    Binding::new(LIST, list),
    Binding::new(TAG, tag),
    Binding::new(UNTAG, untag),
];

const ADD: &str = "add";
const CLEAR: &str = "clear";
const DELETE: &str = "delete";
const EDIT: &str = "edit";
const EXIT: &str = "exit";
const FIND: &str = "find";
const HELP: &str = "help";
const LIST: &str = "list";
const TAG: &str = "tag";
const UNTAG: &str = "untag";

/// The built-in binding table, sorted by keyword.
pub fn builtin_table() -> BindingTable<BuiltinCommand> {
    BindingTable::new(&BUILTIN_BINDINGS)
}

// ── Constructors ────────────────────────────────────────────────────────

fn add(bare: &BareCommand) -> Result<BuiltinCommand, ValidationError> {
    only_options(bare, ADD, &["phone", "email", "tag"])?;
    let [name] = normal_parameters::<1>(bare, ADD, "expects exactly one NAME")?;
    Ok(BuiltinCommand::Add {
        name,
        phone: single_value(bare, ADD, "phone")?,
        email: single_value(bare, ADD, "email")?,
        tags: all_values(bare, ADD, "tag")?,
    })
}

fn clear(bare: &BareCommand) -> Result<BuiltinCommand, ValidationError> {
    no_arguments(bare, CLEAR)?;
    Ok(BuiltinCommand::Clear)
}

fn delete(bare: &BareCommand) -> Result<BuiltinCommand, ValidationError> {
    only_options(bare, DELETE, &[])?;
    let [index] = normal_parameters::<1>(bare, DELETE, "expects exactly one INDEX")?;
    Ok(BuiltinCommand::Delete {
        index: parse_index(DELETE, &index)?,
    })
}

fn edit(bare: &BareCommand) -> Result<BuiltinCommand, ValidationError> {
    only_options(bare, EDIT, &["name", "phone", "email"])?;
    let Some((first, rest)) = bare.parameters().split_first() else {
        return Err(ValidationError::new(EDIT, "expects an INDEX"));
    };
    if first.kind != ParameterKind::Normal {
        return Err(ValidationError::new(EDIT, "INDEX must come first"));
    }
    let index = parse_index(EDIT, &first.value)?;

    let mut added_tags = Vec::new();
    let mut removed_tags = Vec::new();
    for p in rest {
        match p.kind {
            ParameterKind::Additive => added_tags.push(p.value.clone()),
            ParameterKind::Subtractive => removed_tags.push(p.value.clone()),
            ParameterKind::Normal => {
                return Err(ValidationError::new(
                    EDIT,
                    format!("unexpected parameter `{}`; mark tags with + or -", p.value),
                ));
            }
        }
    }

    let name = single_value(bare, EDIT, "name")?;
    let phone = single_value(bare, EDIT, "phone")?;
    let email = single_value(bare, EDIT, "email")?;
    if name.is_none()
        && phone.is_none()
        && email.is_none()
        && added_tags.is_empty()
        && removed_tags.is_empty()
    {
        return Err(ValidationError::new(EDIT, "nothing to change"));
    }

    Ok(BuiltinCommand::Edit {
        index,
        name,
        phone,
        email,
        added_tags,
        removed_tags,
    })
}

fn exit(bare: &BareCommand) -> Result<BuiltinCommand, ValidationError> {
    no_arguments(bare, EXIT)?;
    Ok(BuiltinCommand::Exit)
}

fn find(bare: &BareCommand) -> Result<BuiltinCommand, ValidationError> {
    only_options(bare, FIND, &[])?;
    let keywords = normal_values(bare, FIND)?;
    if keywords.is_empty() {
        return Err(ValidationError::new(FIND, "expects at least one KEYWORD"));
    }
    Ok(BuiltinCommand::Find { keywords })
}

fn help(bare: &BareCommand) -> Result<BuiltinCommand, ValidationError> {
    only_options(bare, HELP, &[])?;
    let mut topics = normal_values(bare, HELP)?;
    if topics.len() > 1 {
        return Err(ValidationError::new(HELP, "expects at most one COMMAND"));
    }
    Ok(BuiltinCommand::Help {
        topic: topics.pop(),
    })
}

fn list(bare: &BareCommand) -> Result<BuiltinCommand, ValidationError> {
    no_arguments(bare, LIST)?;
    Ok(BuiltinCommand::List)
}

fn tag(bare: &BareCommand) -> Result<BuiltinCommand, ValidationError> {
    let (index, tags) = index_and_tags(bare, TAG)?;
    Ok(BuiltinCommand::Tag { index, tags })
}

fn untag(bare: &BareCommand) -> Result<BuiltinCommand, ValidationError> {
    let (index, tags) = index_and_tags(bare, UNTAG)?;
    Ok(BuiltinCommand::Untag { index, tags })
}

// ── Shape helpers ───────────────────────────────────────────────────────

fn no_arguments(bare: &BareCommand, command: &'static str) -> Result<(), ValidationError> {
    only_options(bare, command, &[])?;
    if !bare.parameters().is_empty() {
        return Err(ValidationError::new(command, "takes no parameters"));
    }
    Ok(())
}

fn only_options(
    bare: &BareCommand,
    command: &'static str,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    match bare.option_names().find(|name| !allowed.contains(name)) {
        Some(name) => Err(ValidationError::new(
            command,
            format!("unknown option /{name}"),
        )),
        None => Ok(()),
    }
}

/// Values of all parameters, which must all be unmarked.
fn normal_values(
    bare: &BareCommand,
    command: &'static str,
) -> Result<Vec<String>, ValidationError> {
    bare.parameters()
        .iter()
        .map(|p| require_normal(command, p).map(str::to_owned))
        .collect()
}

/// Exactly `N` unmarked parameters.
fn normal_parameters<const N: usize>(
    bare: &BareCommand,
    command: &'static str,
    usage: &str,
) -> Result<[String; N], ValidationError> {
    let values = normal_values(bare, command)?;
    values
        .try_into()
        .map_err(|_| ValidationError::new(command, usage.to_owned()))
}

fn require_normal<'p>(command: &'static str, p: &'p Parameter) -> Result<&'p str, ValidationError> {
    match p.kind {
        ParameterKind::Normal => Ok(&p.value),
        ParameterKind::Additive | ParameterKind::Subtractive => Err(ValidationError::new(
            command,
            format!("parameter `{}` must not be marked with + or -", p.value),
        )),
    }
}

fn parse_index(command: &'static str, raw: &str) -> Result<usize, ValidationError> {
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(ValidationError::new(
            command,
            format!("INDEX must be a positive integer, got `{raw}`"),
        )),
        Ok(n) => Ok(n),
    }
}

/// At most one value for option `key`; a bare flag is rejected.
fn single_value(
    bare: &BareCommand,
    command: &'static str,
    key: &str,
) -> Result<Option<String>, ValidationError> {
    match bare.option_all_values(key) {
        None => Ok(None),
        Some([value]) => Ok(Some(value.clone())),
        Some([]) => Err(ValidationError::new(
            command,
            format!("option /{key} needs a value"),
        )),
        Some(_) => Err(ValidationError::new(
            command,
            format!("option /{key} given more than once"),
        )),
    }
}

/// Every value for option `key`; a bare flag is rejected.
fn all_values(
    bare: &BareCommand,
    command: &'static str,
    key: &str,
) -> Result<Vec<String>, ValidationError> {
    match bare.option_all_values(key) {
        None => Ok(Vec::new()),
        Some([]) => Err(ValidationError::new(
            command,
            format!("option /{key} needs a value"),
        )),
        Some(values) => Ok(values.to_vec()),
    }
}

fn index_and_tags(
    bare: &BareCommand,
    command: &'static str,
) -> Result<(usize, Vec<String>), ValidationError> {
    only_options(bare, command, &[])?;
    let mut values = normal_values(bare, command)?.into_iter();
    let Some(index) = values.next() else {
        return Err(ValidationError::new(command, "expects INDEX TAG..."));
    };
    let index = parse_index(command, &index)?;
    let tags: Vec<String> = values.collect();
    if tags.is_empty() {
        return Err(ValidationError::new(command, "expects at least one TAG"));
    }
    Ok((index, tags))
}
