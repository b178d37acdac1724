#![allow(dead_code, clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::sync::Arc;
use yangdiff_core::schema::{EnumType, FieldSchema, RecordSchema};
use yangdiff_core::tree::{
    EntryKey, EnumValue, KeyedList, LeafValue, ListEntry, Node, OrderedList, Record,
};
use yangdiff_core::{diff, DiffOptions, Notification, Path, TypedValue};

/// Schemas of a small telemetry model
///
/// ```text
/// /str
/// /x, /config/x                                  (two aliases)
/// /config/mtu                                    (shadow: /state/mtu)
/// /status                                        (enum Status)
/// /value                                         (union)
/// /tags                                          (leaf-list)
/// /interfaces/interface[name]/{name,config/name,config/description}
/// /ordered-lists/ordered-list[key]/{config/key,key,config/value}
/// /nested-lists/outer[key]/{key,inner-lists/inner[key]/{key,config/value}}
/// ```
pub struct Fixture {
    pub device: Arc<RecordSchema>,
    pub interface: Arc<RecordSchema>,
    pub ordered_entry: Arc<RecordSchema>,
    pub outer: Arc<RecordSchema>,
    pub inner: Arc<RecordSchema>,
    pub status: Arc<EnumType>,
}

pub fn fixture() -> Fixture {
    let status = EnumType::new("Status", &[(1, "UP"), (2, "DOWN")]);

    let interface = RecordSchema::new("Interface")
        .field(FieldSchema::leaf("name", &["name", "config/name"]))
        .field(FieldSchema::leaf("description", &["config/description"]))
        .field(FieldSchema::annotation("metadata"))
        .keys(&["name"])
        .build();

    let ordered_entry = RecordSchema::new("OrderedEntry")
        .field(FieldSchema::leaf("key", &["config/key", "key"]))
        .field(FieldSchema::leaf("value", &["config/value"]))
        .keys(&["key"])
        .build();

    let inner = RecordSchema::new("Inner")
        .field(FieldSchema::leaf("key", &["key"]))
        .field(FieldSchema::leaf("value", &["config/value"]))
        .keys(&["key"])
        .build();

    let outer = RecordSchema::new("Outer")
        .field(FieldSchema::leaf("key", &["key"]))
        .field(FieldSchema::ordered_list(
            "inner",
            &["inner-lists/inner"],
            inner.clone(),
        ))
        .keys(&["key"])
        .build();

    let device = RecordSchema::new("Device")
        .field(FieldSchema::leaf("str", &["str"]))
        .field(FieldSchema::leaf("x", &["x", "config/x"]))
        .field(FieldSchema::leaf("mtu", &["config/mtu"]).with_shadow(&["state/mtu"]))
        .field(FieldSchema::leaf("status", &["status"]))
        .field(FieldSchema::leaf("value", &["value"]))
        .field(FieldSchema::leaf_list("tags", &["tags"]))
        .field(FieldSchema::annotation("metadata"))
        .field(FieldSchema::list(
            "interfaces",
            &["interfaces/interface"],
            interface.clone(),
        ))
        .field(FieldSchema::ordered_list(
            "ordered",
            &["ordered-lists/ordered-list"],
            ordered_entry.clone(),
        ))
        .field(FieldSchema::ordered_list(
            "nested",
            &["nested-lists/outer"],
            outer.clone(),
        ))
        .build();

    Fixture {
        device,
        interface,
        ordered_entry,
        outer,
        inner,
        status,
    }
}

impl Fixture {
    pub fn empty(&self) -> Record {
        Record::new(&self.device)
    }

    pub fn status(&self, value: i64) -> LeafValue {
        LeafValue::Enum(EnumValue::new(&self.status, value))
    }

    pub fn interface(&self, name: &str, description: Option<&str>) -> Record {
        let mut entry = Record::new(&self.interface)
            .with("name", LeafValue::string(name))
            .unwrap();
        if let Some(d) = description {
            entry.set("description", LeafValue::string(d)).unwrap();
        }
        entry
    }

    pub fn interfaces(&self, entries: Vec<Record>) -> KeyedList {
        let mut list = KeyedList::new(&self.interface);
        for e in entries {
            list.insert(e).unwrap();
        }
        list
    }

    pub fn ordered_entry(&self, key: &str, value: &str) -> Record {
        Record::new(&self.ordered_entry)
            .with("key", LeafValue::string(key))
            .unwrap()
            .with("value", LeafValue::string(value))
            .unwrap()
    }

    /// An ordered list holding `(key, value)` entries in the given order
    pub fn ordered(&self, entries: &[(&str, &str)]) -> OrderedList {
        let mut list = OrderedList::new(&self.ordered_entry);
        for (k, v) in entries {
            list.append(self.ordered_entry(k, v)).unwrap();
        }
        list
    }

    /// A nested-lists entry whose inner ordered list holds `inner_keys`
    pub fn outer(&self, key: &str, inner_keys: &[&str]) -> Record {
        let mut inner = OrderedList::new(&self.inner);
        for k in inner_keys {
            inner
                .append(
                    Record::new(&self.inner)
                        .with("key", LeafValue::string(*k))
                        .unwrap()
                        .with("value", LeafValue::Int(1))
                        .unwrap(),
                )
                .unwrap();
        }
        Record::new(&self.outer)
            .with("key", LeafValue::string(key))
            .unwrap()
            .with("inner", inner)
            .unwrap()
    }

    pub fn nested(&self, outers: Vec<Record>) -> OrderedList {
        let mut list = OrderedList::new(&self.outer);
        for o in outers {
            list.append(o).unwrap();
        }
        list
    }
}

/// Ordered lists of the device model: field name and list path
const ORDERED_LISTS: &[(&str, &[&str])] = &[
    ("ordered", &["ordered-lists", "ordered-list"]),
    ("nested", &["nested-lists", "outer"]),
];

/// A tree as replay sees it: every leaf by absolute path, each alias
/// rendering included, plus the entry order of each non-empty ordered list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Replayed {
    pub leaves: BTreeMap<Path, TypedValue>,
    pub order: BTreeMap<Path, Vec<EntryKey>>,
}

impl Replayed {
    /// Entry keys of the ordered list at `path`, in list order
    pub fn order_at(&self, path: &str) -> Vec<EntryKey> {
        let path: Path = path.parse().unwrap();
        self.order.get(&path).cloned().unwrap_or_default()
    }
}

pub fn flatten(fx: &Fixture, tree: &Record) -> Replayed {
    let n = diff(&fx.empty(), tree, &DiffOptions::default()).unwrap();
    let mut order = BTreeMap::new();
    for &(field, segments) in ORDERED_LISTS {
        if let Some(Node::OrderedList(list)) = tree.get(field) {
            if !list.is_empty() {
                let keys = list
                    .entries()
                    .iter()
                    .map(|e| e.key_strings().unwrap())
                    .collect();
                order.insert(Path::from_segments(segments), keys);
            }
        }
    }
    Replayed {
        leaves: n.update.into_iter().map(|u| (u.path, u.val)).collect(),
        order,
    }
}

/// Single-key entry identity, for comparing against [`Replayed::order`]
pub fn entry_key(name: &str, value: &str) -> EntryKey {
    EntryKey::from([(name.to_string(), value.to_string())])
}

/// Replay notifications onto a flattened tree
///
/// An atomic message replaces everything below `prefix/<list>` with its
/// updates and sets that list's entry order from the order of its updates.
/// Deletes remove the whole subtree below the deleted path. Entries left
/// without leaves drop out of the recorded order.
pub fn apply(tree: &mut Replayed, notifications: &[Notification]) {
    for n in notifications {
        let prefix = n.prefix.clone().unwrap_or_else(Path::root);

        if n.atomic {
            let mut lists: Vec<Path> = Vec::new();
            let mut order: BTreeMap<Path, Vec<EntryKey>> = BTreeMap::new();
            for u in &n.update {
                let Some(first) = u.path.elem.first() else {
                    continue;
                };
                let list = prefix.append(&[first.name.as_str()]);
                if !lists.contains(&list) {
                    lists.push(list.clone());
                }
                let keys = order.entry(list).or_default();
                if !keys.contains(&first.key) {
                    keys.push(first.key.clone());
                }
            }
            tree.leaves
                .retain(|path, _| !lists.iter().any(|list| in_list(path, list)));
            tree.order.extend(order);
        }

        for d in &n.delete {
            let target = join(&prefix, d);
            tree.leaves.retain(|path, _| !path.has_prefix(&target));
        }

        for u in &n.update {
            tree.leaves.insert(join(&prefix, &u.path), u.val.clone());
        }
    }

    let leaves = &tree.leaves;
    for (list, keys) in tree.order.iter_mut() {
        keys.retain(|key| {
            let entry = list.clone().with_last_keys(key);
            leaves.keys().any(|path| path.has_prefix(&entry))
        });
    }
    tree.order.retain(|_, keys| !keys.is_empty());
}

fn join(prefix: &Path, relative: &Path) -> Path {
    Path {
        elem: prefix.elem.iter().chain(relative.elem.iter()).cloned().collect(),
    }
}

/// True if `path` lies below some entry of the key-less list path `list`
fn in_list(path: &Path, list: &Path) -> bool {
    let (Some(parent), Some(name)) = (list.parent(), list.last()) else {
        return false;
    };
    path.len() > list.len()
        && path.has_prefix(&parent)
        && path.elem[list.len() - 1].name == name.name
}

/// Canonical strings of a notification's update paths, sorted
pub fn sorted_updates(n: &Notification) -> Vec<String> {
    let mut v = n.update_paths();
    v.sort();
    v
}

/// Canonical strings of a notification's delete paths, sorted
pub fn sorted_deletes(n: &Notification) -> Vec<String> {
    let mut v = n.delete_paths();
    v.sort();
    v
}
