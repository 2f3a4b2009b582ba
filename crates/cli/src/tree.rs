// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Indented tree output with box-drawing guides.

/// Columns each nesting level adds.
pub const TREE_LEVEL_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    label: String,
    depth: usize,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), depth: 0, children: Vec::new() }
    }

    /// Append a child one level deeper and return it.
    pub fn add(&mut self, label: impl Into<String>) -> &mut TreeNode {
        let child = TreeNode { label: label.into(), depth: self.depth + 1, children: Vec::new() };
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Indentation of this node's label.
    pub fn width(&self) -> usize {
        self.depth() * TREE_LEVEL_WIDTH
    }

    #[cfg(test)]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Render with a trailing newline after every line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.label.split('\n') {
            out.push_str(line);
            out.push('\n');
        }
        render_children(&self.children, "", &mut out);
        out
    }
}

fn render_children(children: &[TreeNode], prefix: &str, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let (branch, guide) =
            if i + 1 == children.len() { ("└── ", "    ") } else { ("├── ", "│   ") };
        for (n, line) in child.label.split('\n').enumerate() {
            out.push_str(prefix);
            out.push_str(if n == 0 { branch } else { guide });
            out.push_str(line);
            out.push('\n');
        }
        render_children(&child.children, &format!("{}{}", prefix, guide), out);
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
