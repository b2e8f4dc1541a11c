use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of exchanges kept.
pub const DEFAULT_MEMORY_LIMIT: usize = 5;

/// One question/answer exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub user_input: String,
    pub bot_response: String,
    pub when: DateTime<Utc>,
}

/// Bounded log of recent exchanges, oldest evicted first.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    entries: VecDeque<MemoryEntry>,
    limit: usize,
}

impl ConversationMemory {
    /// Create a memory keeping at most `limit` exchanges.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Record an exchange, dropping the oldest once over the limit.
    pub fn add(&mut self, user_input: impl Into<String>, bot_response: impl Into<String>) {
        self.entries.push_back(MemoryEntry {
            user_input: user_input.into(),
            bot_response: bot_response.into(),
            when: Utc::now(),
        });
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    /// All stored exchanges, oldest first.
    pub fn get_all(&self) -> Vec<MemoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Render as `User: ...\nBot: ...\n` lines for prompting.
    pub fn as_context_string(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("User: {}\nBot: {}\n", e.user_input, e.bot_response))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(memory: &ConversationMemory) -> Vec<String> {
        memory.get_all().into_iter().map(|e| e.user_input).collect()
    }

    #[test]
    fn evicts_oldest_beyond_limit() {
        let mut memory = ConversationMemory::new(2);
        memory.add("a", "1");
        memory.add("b", "2");
        memory.add("c", "3");
        assert_eq!(memory.len(), 2);
        assert_eq!(inputs(&memory), vec!["b", "c"]);
    }

    #[test]
    fn default_keeps_five() {
        let mut memory = ConversationMemory::default();
        for i in 0..7 {
            memory.add(format!("q{i}"), format!("a{i}"));
        }
        assert_eq!(memory.limit(), 5);
        assert_eq!(inputs(&memory), vec!["q2", "q3", "q4", "q5", "q6"]);
    }

    #[test]
    fn zero_limit_stores_nothing() {
        let mut memory = ConversationMemory::new(0);
        memory.add("a", "1");
        assert!(memory.is_empty());
    }

    #[test]
    fn context_string_and_clear() {
        let mut memory = ConversationMemory::new(3);
        memory.add("Who hosts?", "Alice");
        memory.add("Guest?", "Bob");
        assert_eq!(
            memory.as_context_string(),
            "User: Who hosts?\nBot: Alice\nUser: Guest?\nBot: Bob\n"
        );
        memory.clear();
        assert!(memory.is_empty());
        assert_eq!(memory.as_context_string(), "");
    }
}
