//! Diff API Demonstration
//!
//! This example diffs two snapshots of a small device model.
//!
//! Key concepts illustrated:
//! 1. Describing record types with schema-path aliases
//! 2. Flat diffs with `diff`
//! 3. Atomic republishing of ordered lists with `diff_with_atomic`
//! 4. Loading options from TOML
#![allow(clippy::unwrap_used, clippy::expect_used)]

use yangdiff_core::logging_facility::{init, Profile};
use yangdiff_core::schema::{FieldSchema, RecordSchema};
use yangdiff_core::tree::{LeafValue, OrderedList, Record};
use yangdiff_core::{diff, diff_with_atomic, DiffOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);
    println!("=== yangdiff Diff API Demo ===\n");

    let rule = RecordSchema::new("Rule")
        .field(FieldSchema::leaf("seq", &["seq", "config/seq"]))
        .field(FieldSchema::leaf("action", &["config/action"]))
        .keys(&["seq"])
        .build();
    let device = RecordSchema::new("Device")
        .field(FieldSchema::leaf("hostname", &["system/config/hostname"]))
        .field(FieldSchema::ordered_list("rules", &["acl/rules/rule"], rule.clone()))
        .build();

    let make_rule = |seq: u64, action: &str| -> Result<Record, yangdiff_core::YangDiffError> {
        Record::new(&rule)
            .with("seq", LeafValue::Uint(seq))?
            .with("action", LeafValue::string(action))
    };

    let original = Record::new(&device)
        .with("hostname", LeafValue::string("edge-1"))?
        .with(
            "rules",
            OrderedList::new(&rule)
                .with(make_rule(10, "ACCEPT")?)?
                .with(make_rule(20, "DROP")?)?,
        )?;
    let modified = Record::new(&device)
        .with("hostname", LeafValue::string("edge-2"))?
        .with(
            "rules",
            OrderedList::new(&rule)
                .with(make_rule(20, "DROP")?)?
                .with(make_rule(30, "ACCEPT")?)?,
        )?;

    // ===== Part 1: Flat diff =====
    println!("## Part 1: diff\n");
    let n = diff(&original, &modified, &DiffOptions::default())?;
    println!("{}\n", n.to_json_pretty()?);

    // ===== Part 2: Atomic diff =====
    println!("## Part 2: diff_with_atomic\n");
    let opts = DiffOptions::from_toml_str("map_to_single_path = true")?;
    for (i, n) in diff_with_atomic(&original, &modified, &opts)?.iter().enumerate() {
        println!("message {} (atomic = {}):", i, n.atomic);
        for u in &n.update {
            println!("  update {} = {:?}", u.path, u.val);
        }
        for d in &n.delete {
            println!("  delete {}", d);
        }
    }

    Ok(())
}
