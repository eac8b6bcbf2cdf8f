use crate::node::Node;
use crc32fast::Hasher;

/// Generate a document seed from its name using CRC32
pub fn get_document_id(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for nodes within a document
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String,
    count: u32,
}

impl IDGenerator {
    pub fn new(document_name: &str) -> Self {
        Self {
            seed: get_document_id(document_name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Advance the counter past every `{seed}-{n}` id already in `tree`,
    /// so ids minted afterwards cannot collide with loaded ones.
    pub fn sync_with(&mut self, tree: &Node) {
        let prefix = format!("{}-", self.seed);
        let mut highest = self.count;
        tree.walk(&mut |node, _| {
            if let Some(n) = node
                .id
                .strip_prefix(&prefix)
                .and_then(|suffix| suffix.parse::<u32>().ok())
            {
                highest = highest.max(n);
            }
        });
        self.count = highest;
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeType;

    #[test]
    fn test_document_id_generation() {
        let id1 = get_document_id("landing");
        let id2 = get_document_id("landing");
        assert_eq!(id1, id2);

        let id3 = get_document_id("pricing");
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IDGenerator::new("landing");

        let id1 = gen.new_id();
        let id2 = gen.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id1.starts_with(gen.seed()));
    }

    #[test]
    fn test_sync_skips_existing_ids() {
        let mut gen = IDGenerator::from_seed("abc".to_string());
        let tree = Node::new("root", NodeType::Page)
            .with_child(Node::new("abc-7", NodeType::Text))
            .with_child(Node::new("other-99", NodeType::Text));

        gen.sync_with(&tree);
        assert_eq!(gen.new_id(), "abc-8");
    }
}
