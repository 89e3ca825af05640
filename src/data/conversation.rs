// ============================================================
// Layer 4 — Conversation Template
// ============================================================
// Renders (role, message) turns into the single prompt string
// the language model is trained on.
//
// Default template (two separators):
//   "{system} USER: {question} ASSISTANT: {answer}</s>"
//
// A turn with an empty message renders as "ROLE:" with no
// separator, which leaves the prompt open for generation.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SYSTEM: &str = "A chat between a curious human and an artificial intelligence assistant. \
The assistant gives helpful, detailed, and polite answers to the human's questions.";

/// How turns are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeparatorStyle {
    /// Every turn ends with `sep`.
    Single,
    /// Turns alternate between `sep` and `sep2`.
    Two,
}

/// Stateful chat template: set messages, then render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub system:    String,
    pub roles:     [String; 2],
    pub messages:  Vec<(String, String)>,
    pub sep_style: SeparatorStyle,
    pub sep:       String,
    pub sep2:      String,
}

impl Default for Conversation {
    fn default() -> Self {
        Self {
            system:    DEFAULT_SYSTEM.to_string(),
            roles:     ["USER".to_string(), "ASSISTANT".to_string()],
            messages:  Vec::new(),
            sep_style: SeparatorStyle::Two,
            sep:       " ".to_string(),
            sep2:      "</s>".to_string(),
        }
    }
}

impl Conversation {
    pub fn user_role(&self) -> &str {
        &self.roles[0]
    }

    pub fn assistant_role(&self) -> &str {
        &self.roles[1]
    }

    /// Drop all turns, keeping the template.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn append_message(&mut self, role: impl Into<String>, message: impl Into<String>) {
        self.messages.push((role.into(), message.into()));
    }

    /// Render system prompt and turns into one string.
    pub fn prompt(&self) -> String {
        let mut out = String::with_capacity(self.system.len() + 64 * self.messages.len());
        out.push_str(&self.system);
        out.push_str(&self.sep);

        for (i, (role, message)) in self.messages.iter().enumerate() {
            if message.is_empty() {
                out.push_str(role);
                out.push(':');
                continue;
            }
            let sep = match self.sep_style {
                SeparatorStyle::Single => &self.sep,
                SeparatorStyle::Two if i % 2 == 0 => &self.sep,
                SeparatorStyle::Two => &self.sep2,
            };
            out.push_str(role);
            out.push_str(": ");
            out.push_str(message);
            out.push_str(sep);
        }
        out
    }

    /// Render one question/answer exchange twice: with the answer,
    /// and with an empty answer for prompt-only supervision.
    pub fn render_pair(&mut self, question: &str, answer: &str) -> (String, String) {
        let user      = self.user_role().to_string();
        let assistant = self.assistant_role().to_string();

        self.clear();
        self.append_message(user.clone(), question);
        self.append_message(assistant.clone(), answer);
        let full = self.prompt();

        self.clear();
        self.append_message(user, question);
        self.append_message(assistant, "");
        let prompt_only = self.prompt();

        (full, prompt_only)
    }
}
