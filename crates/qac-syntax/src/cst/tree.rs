//! Box-drawing dump of a tree, used by `--print-cst`.

use std::fmt;

use super::{CstKind, CstNode};

impl fmt::Display for CstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_label(f, self)?;
        writeln!(f)?;
        write_children(f, self, "")
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, node: &CstNode, prefix: &str) -> fmt::Result {
    let count = node.children().len();
    for (index, child) in node.children().iter().enumerate() {
        let last = index + 1 == count;
        let (branch, indent) = if last { ("└─", "  ") } else { ("├─", "│ ") };
        write!(f, "{prefix}{branch}")?;
        write_label(f, child)?;
        writeln!(f)?;
        write_children(f, child, &format!("{prefix}{indent}"))?;
    }
    Ok(())
}

fn write_label(f: &mut fmt::Formatter<'_>, node: &CstNode) -> fmt::Result {
    f.write_str(node.kind().name())?;
    match node.kind() {
        CstKind::Text(words) | CstKind::LatexBody(words) => write!(f, " [{}]", words.join(" ")),
        CstKind::Image(image) => {
            write!(f, " [{}", image.source)?;
            if let (Some(width), Some(height)) = (image.width, image.height) {
                write!(f, " {width}x{height}")?;
            }
            f.write_str("]")
        }
        CstKind::TableCell(alignment) => write!(f, " [{alignment:?}]"),
        _ => Ok(()),
    }
}
