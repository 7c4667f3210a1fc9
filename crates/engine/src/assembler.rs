//! Context assembly — content nodes become ordered message sequences.
//!
//! Two mutually exclusive strategies, selected by whether the node carries
//! a folder grouping:
//!
//! - **Predecessor**: walk the linear history via `predecessor` ids,
//!   oldest-first. System fragments from the whole history form the single
//!   leading system message, augment blocks follow as background user
//!   messages, then one user/assistant turn pair per history node.
//! - **Folder**: aggregate the sibling nodes into the system message and
//!   emit exactly one turn pair for the node itself. No ancestor traversal.
//!
//! Assembly is deterministic: identical inputs always produce identical
//! output, so recomputing `meta.messages` is idempotent.

use std::collections::HashSet;

use promptloom_core::content::{Content, ContentMap};
use promptloom_core::message::Message;
use thiserror::Error;
use tracing::{debug, trace};

/// Literal instruction wrapped around every augment block.
const AUGMENT_PREAMBLE: &str =
    "Use this code block as background information for format and style, but not for functionality:";

/// Errors from context assembly.
#[derive(Debug, Clone, Error)]
pub enum AssemblyError {
    /// The predecessor chain revisited a node id.
    #[error("Cyclic predecessor chain detected at node '{id}'")]
    CyclicHistory { id: String },
}

/// Assemble the message sequence for one content node.
///
/// The first element is always a single system-role message (possibly with
/// empty content); subsequent elements strictly alternate starting with
/// user, except the augment messages of the predecessor strategy, which
/// are user-role and appear before any turn pair.
pub fn assemble(content: &Content, lookup: &ContentMap) -> Result<Vec<Message>, AssemblyError> {
    if content.context.folder.is_some() {
        Ok(assemble_folder(content, lookup))
    } else {
        assemble_predecessor(content, lookup)
    }
}

/// Write `meta.messages` for every node in a batch.
///
/// Recomputation overwrites deterministically; nodes are independent, so a
/// failure on one node aborts the pass without leaving partial state on
/// the others already processed (their sequences are complete and valid).
pub fn prepare(contents: &mut [Content], lookup: &ContentMap) -> Result<(), AssemblyError> {
    for content in contents.iter_mut() {
        let messages = assemble(content, lookup)?;
        debug!(node = %content.name, count = messages.len(), "Assembled message sequence");
        content.meta.messages = Some(messages);
    }
    Ok(())
}

/// Predecessor strategy: chain traversal, oldest-first.
fn assemble_predecessor(
    content: &Content,
    lookup: &ContentMap,
) -> Result<Vec<Message>, AssemblyError> {
    // Collect the history. Traversal stops at an id absent from the lookup
    // map; a revisited id means the store handed us a cycle.
    let mut history: Vec<&Content> = vec![content];
    let mut visited: HashSet<&str> = HashSet::from([content.path.as_str()]);
    let mut cursor = content;

    while let Some(pred_id) = cursor.context.predecessor.as_deref() {
        let Some(pred) = lookup.get(pred_id) else {
            trace!(node = %cursor.name, predecessor = pred_id, "Predecessor not in lookup, stopping");
            break;
        };
        if !visited.insert(pred_id) {
            return Err(AssemblyError::CyclicHistory {
                id: pred_id.to_string(),
            });
        }
        history.push(pred);
        cursor = pred;
    }
    history.reverse();

    // One leading system message from every fragment across the history.
    let system = history
        .iter()
        .flat_map(|c| c.context.system.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("\n");

    let mut messages = vec![Message::system(system)];

    // Augment blocks, in history order, before any turn pair.
    for block in history.iter().flat_map(|c| c.context.augment.iter()) {
        messages.push(Message::user(format!(
            "{AUGMENT_PREAMBLE}\n```\n{block}\n```\n"
        )));
    }

    // One turn pair per history node; the assistant turn is omitted when
    // the node is unanswered, so the final node may contribute a lone
    // trailing user turn.
    for node in &history {
        messages.push(Message::user(&node.prompt));
        if let Some(response) = node.response.as_deref().filter(|r| !r.is_empty()) {
            messages.push(Message::assistant(response));
        }
    }

    Ok(messages)
}

/// Folder strategy: sibling aggregation, no ancestor traversal.
fn assemble_folder(content: &Content, lookup: &ContentMap) -> Vec<Message> {
    let sibling_ids = content.context.folder.as_deref().unwrap_or_default();

    let mut files: Vec<String> = Vec::new();
    for id in sibling_ids {
        let Some(sibling) = lookup.get(id) else {
            trace!(node = %content.name, sibling = %id, "Folder sibling not in lookup, skipping");
            continue;
        };
        let body = if !sibling.prompt.is_empty() {
            sibling.prompt.as_str()
        } else {
            sibling.response.as_deref().unwrap_or("")
        };
        files.push(format!("<file name=\"{}\">\n{}</file>", sibling.name, body));
    }

    let system = format!(
        "{}\nInstructions are happening in the context of this folder:\n<folder name=\"{}\">\n{}\n</folder>",
        content.context.system.join("\n"),
        content.dir(),
        files.join("\n"),
    );

    let mut messages = vec![Message::system(system), Message::user(&content.prompt)];
    if let Some(response) = content.response.as_deref().filter(|r| !r.is_empty()) {
        messages.push(Message::assistant(response));
    }

    messages
}
