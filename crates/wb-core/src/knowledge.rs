//! Topic knowledge base: an ordered, read-only table of advisory texts.
//!
//! Table order is load-bearing. The response engine scans it front to back
//! and the first topic found in the input wins.

use serde::{Deserialize, Serialize};

use crate::constants::PREVIEW_CHARS;
use crate::error::{CoreError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub topic: String,
    pub content: String,
}

impl KnowledgeEntry {
    pub fn new(topic: &str, content: &str) -> Self {
        Self {
            topic: topic.to_string(),
            content: content.to_string(),
        }
    }

    /// First `PREVIEW_CHARS` characters of the content followed by `...`.
    pub fn preview(&self) -> String {
        let head: String = self.content.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

/// Non-empty ordered set of entries with unique topics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Build a knowledge base, rejecting an empty table, blank topics and
    /// duplicate topics (compared case-insensitively).
    pub fn new(entries: Vec<KnowledgeEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(CoreError::InvalidKnowledgeBase(
                "at least one entry is required".to_string(),
            ));
        }
        let mut seen: Vec<String> = Vec::with_capacity(entries.len());
        for entry in &entries {
            let key = entry.topic.trim().to_lowercase();
            if key.is_empty() {
                return Err(CoreError::InvalidKnowledgeBase(
                    "topic must not be blank".to_string(),
                ));
            }
            if seen.contains(&key) {
                return Err(CoreError::InvalidKnowledgeBase(format!(
                    "duplicate topic: {}",
                    entry.topic
                )));
            }
            seen.push(key);
        }
        Ok(Self { entries })
    }

    /// The built-in wellness table.
    pub fn standard() -> Self {
        let entries = STANDARD_ENTRIES
            .iter()
            .map(|(topic, content)| KnowledgeEntry::new(topic, content))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookup by exact (case-sensitive) topic key.
    pub fn find_exact(&self, topic: &str) -> Option<&KnowledgeEntry> {
        self.entries.iter().find(|e| e.topic == topic)
    }

    /// Lookup ignoring case and surrounding whitespace.
    pub fn find(&self, topic: &str) -> Option<&KnowledgeEntry> {
        let key = topic.trim().to_lowercase();
        self.entries.iter().find(|e| e.topic.to_lowercase() == key)
    }

    /// First entry, in table order, whose lowercased topic occurs in `lowered`.
    /// The caller lowercases the input once.
    pub fn first_topic_in(&self, lowered: &str) -> Option<&KnowledgeEntry> {
        self.entries
            .iter()
            .find(|e| lowered.contains(&e.topic.to_lowercase()))
    }

    /// Case-insensitive search over topic and content. An empty term
    /// returns every entry.
    pub fn search(&self, term: &str) -> Vec<&KnowledgeEntry> {
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.topic.to_lowercase().contains(&needle)
                    || e.content.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::standard()
    }
}

const STANDARD_ENTRIES: &[(&str, &str)] = &[
    (
        "Sleep",
        "Quality sleep is essential for both physical and mental health. Aim for 7-9 hours of sleep per night. Establish a regular sleep schedule, create a relaxing bedtime routine, limit screen time before bed, and ensure your sleep environment is comfortable. If you have persistent sleep problems, consider consulting a healthcare provider.",
    ),
    (
        "Stress Management",
        "Managing stress is crucial for overall wellbeing. Effective techniques include deep breathing exercises, mindfulness meditation, regular physical activity, maintaining social connections, and practicing time management. Consider limiting caffeine intake and incorporating relaxation activities like yoga or progressive muscle relaxation.",
    ),
    (
        "Nutrition",
        "A balanced diet includes fruits, vegetables, whole grains, lean proteins, and healthy fats. Limit processed foods, added sugars, and excessive salt. Stay hydrated by drinking plenty of water. Consider eating smaller, more frequent meals and mindful eating practices. Individual nutritional needs may vary based on age, gender, activity level, and health conditions.",
    ),
    (
        "Exercise",
        "Regular physical activity offers numerous health benefits including improved mood, better sleep, reduced disease risk, and weight management. Aim for at least 150 minutes of moderate-intensity exercise per week, along with muscle-strengthening activities twice weekly. Find activities you enjoy to make exercise sustainable, and remember that even short periods of movement throughout the day are beneficial.",
    ),
    (
        "Mental Health",
        "Mental health is as important as physical health. Practice self-care, maintain social connections, set realistic goals, and develop healthy coping mechanisms for stress. Seek professional help if you experience persistent feelings of sadness, anxiety, or other concerning symptoms. Remember that seeking help is a sign of strength, not weakness.",
    ),
    (
        "Menstrual Health",
        "Menstrual cycles typically occur every 21-35 days and last 2-7 days. Common symptoms include cramping, bloating, and mood changes. Tracking your cycle can help identify patterns and manage symptoms. For menstrual pain, consider over-the-counter pain relievers, heat therapy, gentle exercise, and staying hydrated. If you experience very heavy bleeding, severe pain, or significant disruptions to daily life, consult a healthcare provider.",
    ),
    (
        "Headaches",
        "Headaches can be caused by many factors including stress, dehydration, lack of sleep, eye strain, or underlying health conditions. For occasional headaches, rest, hydration, and over-the-counter pain relievers may help. Identify and avoid personal triggers. If you experience frequent or severe headaches, sudden severe headache, headache with fever, or neurological symptoms, seek medical attention promptly.",
    ),
    (
        "Hydration",
        "Staying well-hydrated is crucial for overall health. Water helps regulate body temperature, keeps joints lubricated, prevents infections, delivers nutrients to cells, and keeps organs functioning properly. Most adults should aim for 8-10 cups (64-80 ounces) of water daily, adjusting for activity level, climate, and individual needs. Increase intake during exercise, hot weather, or illness.",
    ),
];
