//! Fallback rule table consulted when no knowledge-base topic matches.
//!
//! Rules are evaluated in declaration order and the first whose predicate
//! holds wins. Earlier rules shadow later ones: "cramp" together with
//! "period" never reaches the cramp rule because the period rule sits
//! above it.

use crate::knowledge::KnowledgeBase;

/// Keyword test over already-lowercased input.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// True when any keyword is a substring of the input.
    Any(&'static [&'static str]),
    /// True when every inner predicate holds.
    AllOf(&'static [Predicate]),
}

impl Predicate {
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Predicate::Any(keywords) => keywords.iter().any(|k| lowered.contains(k)),
            Predicate::AllOf(parts) => parts.iter().all(|p| p.matches(lowered)),
        }
    }
}

/// What a rule answers with.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Literal(&'static str),
    /// Content of the knowledge entry keyed exactly by `topic`, or `fallback`
    /// when the table lacks that topic (or its content is empty).
    Topic {
        topic: &'static str,
        fallback: &'static str,
    },
}

impl Reply {
    pub fn render<'a>(&'a self, kb: &'a KnowledgeBase) -> &'a str {
        match self {
            Reply::Literal(text) => *text,
            Reply::Topic { topic, fallback } => kb
                .find_exact(topic)
                .map(|e| e.content.as_str())
                .filter(|c| !c.is_empty())
                .unwrap_or(*fallback),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub when: Predicate,
    pub reply: Reply,
}

impl Rule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.when.matches(lowered)
    }
}

/// First rule, in declaration order, matching the lowercased input.
pub fn first_matching(lowered: &str) -> Option<&'static Rule> {
    FALLBACK_RULES.iter().find(|r| r.matches(lowered))
}

pub static FALLBACK_RULES: &[Rule] = &[
    // Health
    Rule {
        name: "headache",
        when: Predicate::Any(&["headache", "migraine"]),
        reply: Reply::Topic {
            topic: "Headaches",
            fallback: "Headaches can be caused by many factors including stress, dehydration, lack of sleep, or eye strain. For occasional headaches, rest, hydration, and over-the-counter pain relievers can help. If you experience frequent or severe headaches, please consult a healthcare provider.",
        },
    },
    Rule {
        name: "sleep",
        when: Predicate::Any(&["sleep", "insomnia", "tired"]),
        reply: Reply::Topic {
            topic: "Sleep",
            fallback: "Quality sleep is essential for both physical and mental health. Try maintaining a consistent sleep schedule, creating a relaxing bedtime routine, limiting screen time before bed, and ensuring your sleep environment is comfortable. If sleep problems persist, consider speaking with a healthcare provider.",
        },
    },
    Rule {
        name: "nutrition",
        when: Predicate::Any(&["diet", "nutrition", "eating"]),
        reply: Reply::Topic {
            topic: "Nutrition",
            fallback: "A balanced diet rich in fruits, vegetables, whole grains, lean proteins, and healthy fats supports overall health. Try to minimize processed foods and added sugars. Remember, moderation is key, and individual nutritional needs may vary. Consider consulting a registered dietitian for personalized advice.",
        },
    },
    // Mental fitness
    Rule {
        name: "stress",
        when: Predicate::Any(&["stress", "anxiety", "anxious"]),
        reply: Reply::Topic {
            topic: "Stress Management",
            fallback: "Stress and anxiety are common experiences. Techniques like deep breathing, mindfulness meditation, physical activity, and connecting with supportive people can help manage these feelings. If anxiety is interfering with your daily life, professional support from a therapist or counselor can be beneficial.",
        },
    },
    Rule {
        name: "low-mood",
        when: Predicate::Any(&["depress", "sad", "low mood"]),
        reply: Reply::Topic {
            topic: "Mental Health",
            fallback: "I'm sorry to hear you're feeling this way. Talking to someone you trust, engaging in activities you enjoy, physical exercise, and maintaining regular routines can help with low mood. If these feelings persist or are affecting your daily functioning, please reach out to a mental health professional for support.",
        },
    },
    Rule {
        name: "mindfulness",
        when: Predicate::Any(&["mindful", "meditat"]),
        reply: Reply::Literal(
            "Mindfulness and meditation can help reduce stress, improve focus, and promote emotional well-being. Even just a few minutes of quiet reflection or focused breathing each day can make a difference. There are many apps and online resources available to guide you through different meditation techniques.",
        ),
    },
    // Menstrual health
    Rule {
        name: "menstrual",
        when: Predicate::Any(&["period", "menstrual", "menstruation"]),
        reply: Reply::Topic {
            topic: "Menstrual Health",
            fallback: "Menstrual cycles typically occur every 21-35 days and last 2-7 days, though this varies person to person. Common symptoms include cramping, bloating, and mood changes. Regular tracking can help identify patterns and manage symptoms. If you experience very heavy bleeding, severe pain, or significant disruptions to your daily life, consider consulting a healthcare provider.",
        },
    },
    Rule {
        name: "pms",
        when: Predicate::Any(&["pms", "premenstrual"]),
        reply: Reply::Literal(
            "Premenstrual syndrome (PMS) can include physical and emotional symptoms that occur before your period. Regular exercise, adequate sleep, staying hydrated, and eating balanced meals may help manage symptoms. Some people also find relief with over-the-counter pain relievers or heat therapy for cramps. If symptoms significantly impact your life, talk to a healthcare provider about additional options.",
        ),
    },
    Rule {
        name: "cramps",
        when: Predicate::AllOf(&[
            Predicate::Any(&["cramp"]),
            Predicate::Any(&["period", "menstrual"]),
        ]),
        reply: Reply::Literal(
            "Menstrual cramps are caused by uterine contractions and are a common experience. Over-the-counter pain relievers, heat therapy (like a heating pad), gentle exercise, and staying hydrated may help relieve discomfort. If you experience severe cramping that interferes with daily activities, consider consulting a healthcare provider.",
        ),
    },
    // Exercise
    Rule {
        name: "exercise",
        when: Predicate::Any(&["exercise", "workout", "fitness"]),
        reply: Reply::Topic {
            topic: "Exercise",
            fallback: "Regular physical activity offers numerous benefits for both physical and mental health. Aim for a mix of cardio, strength training, and flexibility exercises. Start gradually if you're new to exercise, and find activities you enjoy to make it sustainable. Remember that even short periods of movement throughout the day can be beneficial.",
        },
    },
    // General health
    Rule {
        name: "hydration",
        when: Predicate::Any(&["water", "hydration", "drink"]),
        reply: Reply::Topic {
            topic: "Hydration",
            fallback: "Staying well-hydrated is crucial for overall health. Water helps regulate body temperature, keeps joints lubricated, prevents infections, delivers nutrients to cells, and keeps organs functioning properly. Most adults should aim for 8-10 cups (64-80 ounces) of water daily, adjusting for activity level, climate, and individual needs.",
        },
    },
    Rule {
        name: "supplements",
        when: Predicate::Any(&["vitamin", "mineral", "supplement"]),
        reply: Reply::Literal(
            "Vitamins and minerals are essential nutrients that support various bodily functions. While a balanced diet is the best source of these nutrients, supplements may be beneficial in certain cases. It's best to consult with a healthcare provider before starting any supplement regimen, as some may interact with medications or be inappropriate for certain conditions.",
        ),
    },
    Rule {
        name: "weight",
        when: Predicate::Any(&["weight", "obesity", "bmi"]),
        reply: Reply::Literal(
            "Maintaining a healthy weight involves balanced nutrition, regular physical activity, adequate sleep, and stress management. Focus on sustainable lifestyle changes rather than quick fixes. Remember that weight is just one aspect of health, and factors like muscle mass, fitness level, and metabolic health are also important. Consider consulting with healthcare providers for personalized guidance.",
        ),
    },
    // Mental health
    Rule {
        name: "therapy",
        when: Predicate::Any(&["therapy", "counseling", "therapist"]),
        reply: Reply::Literal(
            "Therapy or counseling can be beneficial for many mental health concerns, life transitions, or personal growth. Different approaches work for different people - cognitive behavioral therapy, mindfulness-based therapy, and psychodynamic therapy are just a few options. Finding the right therapist is important; it's okay to speak with a few professionals before deciding who you feel comfortable working with.",
        ),
    },
    Rule {
        name: "adhd",
        when: Predicate::Any(&["adhd", "attention deficit"]),
        reply: Reply::Literal(
            "ADHD (Attention-Deficit/Hyperactivity Disorder) involves patterns of inattention, hyperactivity, and impulsivity that can impact daily functioning. Management typically includes a combination of behavioral strategies, educational support, and sometimes medication. If you're concerned about ADHD symptoms, consider speaking with a healthcare provider for proper evaluation and personalized recommendations.",
        ),
    },
    // Small talk
    Rule {
        name: "greeting",
        when: Predicate::Any(&["hello", "hi"]),
        reply: Reply::Literal(
            "Hello there! How are you feeling today? I'm here to chat about health, wellness, or anything else on your mind.",
        ),
    },
    Rule {
        name: "how-are-you",
        when: Predicate::Any(&["how are you"]),
        reply: Reply::Literal(
            "I'm just a digital buddy, but I'm here and ready to chat with you about health, wellness, or provide support when needed!",
        ),
    },
    Rule {
        name: "identity",
        when: Predicate::Any(&["name"]),
        reply: Reply::Literal(
            "I'm ChatBuddy, your AI companion designed to provide support and conversation on topics including health and wellness.",
        ),
    },
    Rule {
        name: "gratitude",
        when: Predicate::Any(&["thank"]),
        reply: Reply::Literal(
            "You're very welcome! I'm here anytime you want to chat about health, wellness, or anything else.",
        ),
    },
    Rule {
        name: "farewell",
        when: Predicate::Any(&["bye", "goodbye"]),
        reply: Reply::Literal(
            "Goodbye! Take care of yourself and remember I'm here whenever you need to talk.",
        ),
    },
    // Feature pointers
    Rule {
        name: "emotions",
        when: Predicate::Any(&["emotion", "feeling", "mood"]),
        reply: Reply::Literal(
            "Emotions are an important part of our wellbeing. You can use the Emotion Tracker tab to log and track how you're feeling over time. Would you like to try that now?",
        ),
    },
    Rule {
        name: "games",
        when: Predicate::Any(&["game", "gesture", "hand"]),
        reply: Reply::Literal(
            "I have some interactive hand gesture games available in the Games tab. You can try them out by switching to that tab. Would you like to try that now?",
        ),
    },
    Rule {
        name: "knowledge",
        when: Predicate::Any(&["knowledge", "database", "information"]),
        reply: Reply::Literal(
            "I have a knowledge base tab where you can browse health and wellness information by topic. You can access it by switching to the Knowledge tab.",
        ),
    },
];
