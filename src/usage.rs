/*!
 * 用法信息
 *
 * A read-only projection of the registered rules, rendered in a fixed
 * layout:
 *
 * ```text
 * Usage: <name> <cmd> [options] [<args>]
 *   <rule line>   <description>
 *     -<flag>=<placeholder>   <flag usage>
 * ```
 *
 * The registry writes an entry per registration. `help` keeps a clone of the
 * same table, so it sees rules registered after it.
 */

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::flags::FlagInfo;

/// Extra columns between the longest rule line and the descriptions.
const PADDING: usize = 3;

/// Order in which commands are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageOrder {
    #[default]
    Alphabetical,
    Registration,
}

/// What the listing shows for one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEntry {
    pub line: String,
    pub description: String,
    pub flags: Vec<FlagInfo>,
}

#[derive(Debug, Default)]
struct UsageTable {
    entries: BTreeMap<String, (usize, UsageEntry)>,
    next_seq: usize,
    order: UsageOrder,
}

#[derive(Debug, Clone)]
pub struct Usage {
    app_name: Arc<str>,
    table: Arc<RwLock<UsageTable>>,
}

impl Usage {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: Arc::from(app_name),
            table: Arc::new(RwLock::new(UsageTable::default())),
        }
    }

    /// Adds or replaces an entry. A replaced entry keeps its registration slot.
    pub fn insert(&self, name: &str, entry: UsageEntry) {
        let mut table = self.table.write();
        let seq = match table.entries.get(name) {
            Some((seq, _)) => *seq,
            None => {
                table.next_seq += 1;
                table.next_seq
            }
        };
        table.entries.insert(name.to_string(), (seq, entry));
    }

    pub fn set_order(&self, order: UsageOrder) {
        self.table.write().order = order;
    }

    pub fn order(&self) -> UsageOrder {
        self.table.read().order
    }

    /// Entries in display order.
    pub fn entries(&self) -> Vec<UsageEntry> {
        let table = self.table.read();
        let mut entries: Vec<&(usize, UsageEntry)> = table.entries.values().collect();
        if table.order == UsageOrder::Registration {
            entries.sort_by_key(|(seq, _)| *seq);
        }
        entries.into_iter().map(|(_, e)| e.clone()).collect()
    }

    pub fn render(&self) -> String {
        let entries = self.entries();
        let column = entries
            .iter()
            .map(|e| width(&e.line))
            .max()
            .unwrap_or(0)
            + PADDING;

        let mut out = format!("Usage: {} <cmd> [options] [<args>]\n", self.app_name);
        for entry in &entries {
            let spaces = " ".repeat(column.saturating_sub(width(&entry.line)));
            out.push_str(&format!("  {}{}{}\n", entry.line, spaces, entry.description));

            for flag in &entry.flags {
                let mut option = format!("-{}", flag.name);
                if let Some(placeholder) = placeholder(flag) {
                    option.push('=');
                    option.push_str(&placeholder);
                }
                // A flag wider than the column still gets one space.
                let pad = column.saturating_sub(width(&option) + 2).max(1);
                let spaces = " ".repeat(pad);
                out.push_str(&format!("    {}{}{}\n", option, spaces, flag.usage));
            }
        }
        out.push('\n');
        out
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(self.render().as_bytes())?;
        w.flush()
    }
}

/// Placeholder for a flag's value, inferred from its default.
pub fn placeholder(flag: &FlagInfo) -> Option<String> {
    let default = flag.default.as_str();
    if default.is_empty() {
        Some("<value>".to_string())
    } else if flag.is_bool || default == "false" {
        None
    } else if default.parse::<i64>().is_ok() {
        Some("<n>".to_string())
    } else {
        Some(format!("\"{}\"", default))
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(name: &str, default: &str, is_bool: bool) -> FlagInfo {
        FlagInfo {
            name: name.to_string(),
            default: default.to_string(),
            usage: format!("{} usage", name),
            is_bool,
        }
    }

    fn entry(line: &str, description: &str, flags: Vec<FlagInfo>) -> UsageEntry {
        UsageEntry {
            line: line.to_string(),
            description: description.to_string(),
            flags,
        }
    }

    #[test]
    fn placeholders_by_default_value() {
        assert_eq!(placeholder(&flag("a", "", false)).as_deref(), Some("<value>"));
        assert_eq!(placeholder(&flag("b", "false", true)), None);
        assert_eq!(placeholder(&flag("c", "true", true)), None);
        assert_eq!(placeholder(&flag("d", "false", false)), None);
        assert_eq!(placeholder(&flag("e", "-12", false)).as_deref(), Some("<n>"));
        assert_eq!(placeholder(&flag("f", "0.5", false)).as_deref(), Some("\"0.5\""));
        assert_eq!(placeholder(&flag("g", "x y", false)).as_deref(), Some("\"x y\""));
    }

    #[test]
    fn renders_aligned_listing() {
        let usage = Usage::new("myapp");
        usage.insert("help", entry("help", "Output this usage information.", vec![]));
        usage.insert(
            "add",
            entry(
                "add [options] <key>",
                "Add a key.",
                vec![flag("n", "0", false), flag("v", "false", true)],
            ),
        );

        // longest line is "add [options] <key>" (19) so the column is 22
        let expected = "\
Usage: myapp <cmd> [options] [<args>]
  add [options] <key>   Add a key.
    -n=<n>              n usage
    -v                  v usage
  help                  Output this usage information.

";
        assert_eq!(usage.render(), expected);
    }

    #[test]
    fn empty_table_renders_header_only() {
        let usage = Usage::new("x");
        assert_eq!(usage.render(), "Usage: x <cmd> [options] [<args>]\n\n");
    }

    #[test]
    fn registration_order_keeps_first_slot_on_replace() {
        let usage = Usage::new("x");
        usage.insert("zeta", entry("zeta", "", vec![]));
        usage.insert("alpha", entry("alpha", "", vec![]));
        usage.insert("zeta", entry("zeta", "again", vec![]));

        let names = |u: &Usage| u.entries().into_iter().map(|e| e.line).collect::<Vec<_>>();
        assert_eq!(names(&usage), ["alpha", "zeta"]);

        assert_eq!(usage.order(), UsageOrder::Alphabetical);
        usage.set_order(UsageOrder::Registration);
        assert_eq!(usage.order(), UsageOrder::Registration);
        assert_eq!(names(&usage), ["zeta", "alpha"]);
        assert_eq!(usage.entries()[0].description, "again");
    }
}
