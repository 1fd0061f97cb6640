//! Markup-to-plain-text projection
//!
//! Rich text is stored as HTML fragments. [`to_plain_text`] builds a small
//! element tree with the HTML body-parsing rules that matter for fragments
//! (implied `</p>` and `</li>`, void elements, stray end tags) and then
//! concatenates its text nodes. After each closed `p`, `h1`, `h2`, `h3`,
//! `pre`, `ul` or `ol` a blank line is written when the element, or its
//! parent, is followed by a sibling. A single trailing blank line is trimmed.
//!
//! ```
//! use tristate_core::markup::to_plain_text;
//!
//! let text = to_plain_text("<p>Hello my &lt;b&gt;friend&lt;/b&gt;</p>").unwrap();
//! assert_eq!(text, "Hello my <b>friend</b>");
//! ```

use crate::error::{Error, Result};

/// Elements followed by a blank line in the projection
const BREAKING: &[&str] = &["p", "h1", "h2", "h3", "pre", "ul", "ol"];

/// Elements that never have content
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Start tags that implicitly close an open `p`
const CLOSES_P: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset", "figure",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "ul",
];

/// Elements whose content is not markup
const RAW_TEXT: &[&str] = &["script", "style", "textarea", "title"];

/// Elements that bound the search for an open `p`
const SCOPE_BOUNDARY: &[&str] = &["button", "caption", "object", "table", "td", "template", "th"];

/// Document-level tags that are implied for fragments
const IMPLIED: &[&str] = &["body", "head", "html"];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Convert an HTML fragment to plain text
///
/// Fails on an unterminated tag or comment.
pub fn to_plain_text(markup: &str) -> Result<String> {
    let tree = Tree::parse(markup)?;
    let mut out = String::new();
    tree.walk(ROOT, &mut out);
    if out.ends_with("\n\n") {
        out.truncate(out.len() - 2);
    }
    Ok(out)
}

// ============================================================================
// Tokenizer
// ============================================================================

#[derive(Debug, PartialEq)]
enum Token {
    Text(String),
    Start(String),
    End(String),
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            tokens.push(Token::Text(unescape(rest)));
            break;
        };
        if lt > 0 {
            tokens.push(Token::Text(unescape(&rest[..lt])));
            rest = &rest[lt..];
        }

        let after = &rest[1..];
        if let Some(body) = after.strip_prefix("!--") {
            let end = body
                .find("-->")
                .ok_or_else(|| Error::Markup("unterminated comment".to_string()))?;
            rest = &body[end + 3..];
        } else if after.starts_with('!') || after.starts_with('?') {
            let end = after
                .find('>')
                .ok_or_else(|| Error::Markup("unterminated declaration".to_string()))?;
            rest = &after[end + 1..];
        } else if let Some(body) = after.strip_prefix('/') {
            let end = body
                .find('>')
                .ok_or_else(|| Error::Markup("unterminated end tag".to_string()))?;
            let name = tag_name(&body[..end]);
            if !name.is_empty() {
                tokens.push(Token::End(name));
            }
            rest = &body[end + 1..];
        } else if after.starts_with(|c: char| c.is_ascii_alphabetic()) {
            let end = start_tag_end(after)
                .ok_or_else(|| Error::Markup(format!("unterminated tag: <{}", tag_name(after))))?;
            let name = tag_name(&after[..end]);
            rest = &after[end + 1..];

            if RAW_TEXT.contains(&name.as_str()) {
                let close = find_close_tag(rest, &name).unwrap_or(rest.len());
                let content = &rest[..close];
                let escaped = name != "script" && name != "style";
                tokens.push(Token::Start(name));
                if !content.is_empty() {
                    let text = if escaped { unescape(content) } else { content.to_string() };
                    tokens.push(Token::Text(text));
                }
                rest = &rest[close..];
            } else {
                tokens.push(Token::Start(name));
            }
        } else {
            // a lone '<' is text
            tokens.push(Token::Text("<".to_string()));
            rest = after;
        }
    }

    Ok(tokens)
}

fn tag_name(s: &str) -> String {
    s.chars()
        .take_while(|c| !c.is_whitespace() && *c != '/' && *c != '>')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Offset of the `>` closing a start tag, skipping quoted attribute values
fn start_tag_end(s: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

fn find_close_tag(s: &str, name: &str) -> Option<usize> {
    let lower = s.to_ascii_lowercase();
    let needle = format!("</{name}");
    lower.find(&needle)
}

/// Replace named and numeric character references
fn unescape(s: &str) -> String {
    html_escape::decode_html_entities(s).into_owned()
}

// ============================================================================
// Tree
// ============================================================================

const ROOT: usize = 0;

#[derive(Debug)]
enum NodeKind {
    Root,
    Element(String),
    Text(String),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn parse(markup: &str) -> Result<Self> {
        let mut builder = Builder {
            tree: Tree {
                nodes: vec![Node {
                    kind: NodeKind::Root,
                    parent: None,
                    children: Vec::new(),
                }],
            },
            open: vec![ROOT],
        };
        for token in tokenize(markup)? {
            match token {
                Token::Text(text) => builder.text(text),
                Token::Start(name) => builder.start(name),
                Token::End(name) => builder.end(&name),
            }
        }
        Ok(builder.tree)
    }

    fn name(&self, id: usize) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element(name) => Some(name),
            _ => None,
        }
    }

    fn has_next_sibling(&self, id: usize) -> bool {
        match self.nodes[id].parent {
            Some(parent) => self.nodes[parent].children.last() != Some(&id),
            None => false,
        }
    }

    fn walk(&self, id: usize, out: &mut String) {
        let node = &self.nodes[id];
        if let NodeKind::Text(text) = &node.kind {
            out.push_str(text);
        }
        for &child in &node.children {
            self.walk(child, out);
        }
        if let NodeKind::Element(name) = &node.kind {
            let followed = self.has_next_sibling(id)
                || node.parent.is_some_and(|p| self.has_next_sibling(p));
            if BREAKING.contains(&name.as_str()) && followed {
                out.push_str("\n\n");
            }
        }
    }
}

struct Builder {
    tree: Tree,
    open: Vec<usize>,
}

impl Builder {
    fn current(&self) -> usize {
        self.open.last().copied().unwrap_or(ROOT)
    }

    fn append(&mut self, kind: NodeKind) -> usize {
        let parent = self.current();
        let id = self.tree.nodes.len();
        self.tree.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.tree.nodes[parent].children.push(id);
        id
    }

    /// Position in the open stack of the nearest element matching `pred`,
    /// stopping at a scope boundary
    fn in_scope(&self, pred: impl Fn(&str) -> bool, boundary: &[&str]) -> Option<usize> {
        for (pos, &id) in self.open.iter().enumerate().skip(1).rev() {
            let name = self.tree.name(id)?;
            if pred(name) {
                return Some(pos);
            }
            if boundary.contains(&name) {
                return None;
            }
        }
        None
    }

    fn close_p(&mut self) {
        if let Some(pos) = self.in_scope(|n| n == "p", SCOPE_BOUNDARY) {
            self.open.truncate(pos);
        }
    }

    fn text(&mut self, text: String) {
        let current = self.current();
        let text = if current == ROOT && self.tree.nodes[ROOT].children.is_empty() {
            text.trim_start().to_string()
        } else {
            text
        };
        if !text.is_empty() {
            self.append(NodeKind::Text(text));
        }
    }

    fn start(&mut self, name: String) {
        if IMPLIED.contains(&name.as_str()) {
            return;
        }
        if name == "li" {
            let mut boundary = SCOPE_BOUNDARY.to_vec();
            boundary.extend(["ol", "ul"]);
            if let Some(pos) = self.in_scope(|n| n == "li", &boundary) {
                self.open.truncate(pos);
            }
        }
        if CLOSES_P.contains(&name.as_str()) {
            self.close_p();
        }
        if HEADINGS.contains(&name.as_str()) {
            let current = self.current();
            if self.tree.name(current).is_some_and(|n| HEADINGS.contains(&n)) {
                self.open.pop();
            }
        }

        let void = VOID.contains(&name.as_str());
        let id = self.append(NodeKind::Element(name));
        if !void {
            self.open.push(id);
        }
    }

    fn end(&mut self, name: &str) {
        if IMPLIED.contains(&name) || VOID.contains(&name) {
            return;
        }
        if name == "p" && self.in_scope(|n| n == "p", SCOPE_BOUNDARY).is_none() {
            self.append(NodeKind::Element("p".to_string()));
            return;
        }
        let matches = |n: &str| {
            n == name || (HEADINGS.contains(&name) && HEADINGS.contains(&n))
        };
        if let Some(pos) = self.in_scope(matches, &[]) {
            self.open.truncate(pos);
        }
    }
}
