//! Parser for `mvn dependency:tree -Dverbose` text output.
//!
//! A reactor build prints one section per module:
//!
//! ```text
//! [INFO] --- maven-dependency-plugin:3.6.1:tree (default-cli) @ app ---
//! [INFO] com.example:app:jar:1.0
//! [INFO] +- org.b:b:jar:1.0:compile
//! [INFO] \- org.c:c:jar:1.0:compile
//! [INFO]    \- (org.b:b:jar:2.0:compile - omitted for conflict with 1.0)
//! ```
//!
//! Each tree level is indented by three columns. Parenthesised entries were
//! omitted by Maven; the reason after ` - ` becomes the node state.

use impact_core::tree::{RawArtifact, RawNode};
use impact_util::errors::{ImpactError, ImpactResult};

const INDENT: usize = 3;

/// The dependency tree of one reactor module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTree {
    /// Module name from the plugin header, or the root artifact id.
    pub name: String,
    pub tree: RawNode,
}

/// Parse every module tree in `output`.
///
/// Log lines other than `[INFO]` are skipped. Output without log prefixes
/// (as written by `-DoutputFile`) is accepted too.
pub fn parse_tree_output(output: &str) -> ImpactResult<Vec<ModuleTree>> {
    let mut modules = Vec::new();
    let mut header_name: Option<String> = None;
    let mut current: Option<TreeState> = None;

    for (idx, raw_line) in output.lines().enumerate() {
        let line_no = idx + 1;
        let Some(line) = strip_log_prefix(raw_line) else {
            continue;
        };

        if let Some(state) = current.as_mut() {
            if let Some((depth, entry)) = split_glyphs(line) {
                let node = parse_entry(entry).ok_or_else(|| ImpactError::TreeParse {
                    line: line_no,
                    message: format!("unrecognised dependency entry `{}`", entry.trim()),
                })?;
                state.push(depth, node, line_no)?;
                continue;
            }
            if let Some(done) = current.take() {
                modules.extend(done.finish());
            }
        }

        let trimmed = line.trim();
        if let Some(name) = plugin_header_module(trimmed) {
            header_name = Some(name.to_string());
            continue;
        }
        if let Some(root) = parse_root(trimmed) {
            let name = header_name
                .take()
                .unwrap_or_else(|| root.artifact_id.clone());
            current = Some(TreeState::new(name, root));
        }
    }

    if let Some(done) = current.take() {
        modules.extend(done.finish());
    }

    tracing::debug!(modules = modules.len(), "parsed dependency tree output");
    Ok(modules)
}

/// Remove the Maven log level prefix. `None` for non-`[INFO]` log lines.
fn strip_log_prefix(line: &str) -> Option<&str> {
    let line = line.trim_end();
    if let Some(rest) = line.strip_prefix("[INFO]") {
        return Some(rest.strip_prefix(' ').unwrap_or(rest));
    }
    if line.starts_with('[') {
        return None;
    }
    Some(line)
}

/// `--- maven-dependency-plugin:3.6.1:tree (default-cli) @ module ---`
fn plugin_header_module(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("--- ")?.strip_suffix(" ---")?;
    if !inner.starts_with("maven-dependency-plugin:") && !inner.starts_with("dependency:") {
        return None;
    }
    let (_, module) = inner.rsplit_once(" @ ")?;
    let module = module.trim();
    if module.is_empty() {
        None
    } else {
        Some(module)
    }
}

/// A module root line: a bare four-part coordinate.
fn parse_root(line: &str) -> Option<RawArtifact> {
    if line.is_empty() || line.contains(char::is_whitespace) || line.matches(':').count() != 3 {
        return None;
    }
    RawArtifact::parse_coordinate(line)
}

/// Split the tree glyph prefix off a line, returning the depth and the entry.
fn split_glyphs(line: &str) -> Option<(usize, &str)> {
    let mut pos = 0;
    loop {
        let rest = line.get(pos..)?;
        if rest.starts_with("+- ") || rest.starts_with("\\- ") {
            return Some((pos / INDENT + 1, &rest[INDENT..]));
        }
        if rest.starts_with("|  ") || rest.starts_with("   ") {
            pos += INDENT;
            continue;
        }
        return None;
    }
}

/// Parse one tree entry into a leaf node.
fn parse_entry(entry: &str) -> Option<RawNode> {
    let entry = entry.trim();
    if let Some(inner) = entry.strip_prefix('(').and_then(|e| e.strip_suffix(')')) {
        let (coordinate, reasons) = match inner.split_once(" - ") {
            Some((c, r)) => (c, r),
            None => (inner, ""),
        };
        let artifact = RawArtifact::parse_coordinate(first_token(coordinate)?)?;
        return Some(omitted_node(artifact, reasons));
    }
    let artifact = RawArtifact::parse_coordinate(first_token(entry)?)?;
    Some(RawNode::included(artifact, Vec::new()))
}

fn first_token(s: &str) -> Option<&str> {
    s.split_whitespace().next()
}

fn omitted_node(artifact: RawArtifact, reasons: &str) -> RawNode {
    for reason in reasons.split(';').map(str::trim) {
        if let Some(winner) = reason.strip_prefix("omitted for conflict with ") {
            let mut related = artifact.clone();
            related.version = winner.trim().to_string();
            return RawNode::evicted(artifact, related);
        }
        if reason == "omitted for cycle" {
            return RawNode::cycle(artifact);
        }
    }
    // Duplicates and managed versions are ordinary inclusions.
    RawNode::included(artifact, Vec::new())
}

/// Nodes of the tree being read, one per open depth level.
struct TreeState {
    name: String,
    stack: Vec<RawNode>,
}

impl TreeState {
    fn new(name: String, root: RawArtifact) -> Self {
        Self {
            name,
            stack: vec![RawNode::included(root, Vec::new())],
        }
    }

    fn push(&mut self, depth: usize, node: RawNode, line: usize) -> ImpactResult<()> {
        if depth > self.stack.len() {
            return Err(ImpactError::TreeParse {
                line,
                message: format!(
                    "entry at depth {depth} has no parent at depth {}",
                    depth - 1
                ),
            }
            .into());
        }
        self.close_to(depth);
        self.stack.push(node);
        Ok(())
    }

    /// Attach open nodes to their parents until `depth` levels remain.
    /// The root is never closed.
    fn close_to(&mut self, depth: usize) {
        while self.stack.len() > depth.max(1) {
            if let Some(done) = self.stack.pop() {
                if let Some(parent) = self.stack.last_mut() {
                    parent.children.push(done);
                }
            }
        }
    }

    fn finish(mut self) -> Option<ModuleTree> {
        self.close_to(1);
        let tree = self.stack.pop()?;
        Some(ModuleTree {
            name: self.name,
            tree,
        })
    }
}
