//! Default training data used on first start and by reset.

use crate::types::{Category, TrainingData};

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl TrainingData {
    /// Build the four-category default seed.
    ///
    /// Returns a freshly allocated value on every call.
    pub fn default_seed() -> Self {
        let mut data = TrainingData::new();

        data.insert(
            "greetings",
            Category::new(
                owned(&["hello", "hi", "hey", "greetings", "what's up", "how are you"]),
                owned(&[
                    "Hello. I am Chipi. I am happy to see you today. How can I help you?",
                    "Hi there. It is great to see you here. What would you like to talk about?",
                    "Hey. I am Chipi, your friendly AI assistant. How can I help you?",
                ]),
            ),
        );

        data.insert(
            "aboutMe",
            Category::new(
                owned(&["who are you", "what are you", "tell me about yourself"]),
                owned(&[
                    "I am Chipi, an AI chatbot created to help and chat with people.",
                    "My name is Chipi and I am a fully self-contained AI assistant.",
                ]),
            ),
        );

        data.insert(
            "help",
            Category::new(
                owned(&["can you help", "help me", "i need help"]),
                owned(&[
                    "Of course I can help you. Please tell me what you need.",
                    "I would be very happy to help you with whatever you need.",
                ]),
            ),
        );

        data.insert(
            "goodbye",
            Category::new(
                owned(&["bye", "goodbye", "see you", "farewell"]),
                owned(&[
                    "Goodbye. It was great chatting with you. Come back anytime.",
                    "See you later. Thanks for the conversation. Have a wonderful day.",
                ]),
            ),
        );

        data
    }
}
