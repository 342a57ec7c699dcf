//! Per-turn system instructions
//!
//! Fixed grounding rules come first, in this order: role, source priority,
//! guide citation, search citation, blending, conflicts. The persona directive
//! is appended last.

use crate::persona::PersonaState;

/// Default city served by the concierge
pub const DEFAULT_CITY: &str = "Bangalore";

/// Builds the instruction text handed to the reasoning engine
#[derive(Debug, Clone)]
pub struct InstructionComposer {
    city: String,
}

impl Default for InstructionComposer {
    fn default() -> Self {
        Self::new(DEFAULT_CITY)
    }
}

impl InstructionComposer {
    /// Create a composer for `city`
    #[must_use]
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }

    /// City name used in the instructions
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Compose the instructions for `persona`
    #[must_use]
    pub fn compose(&self, persona: PersonaState) -> String {
        let mut prompt = self.grounding_rules();
        prompt.push_str("\n\n");
        prompt.push_str(&self.persona_directive(persona));
        prompt
    }

    fn grounding_rules(&self) -> String {
        let city = &self.city;
        let rules = [
            "Always check your knowledge base (the city guide) first for information. \
             Use the web search tool ONLY for information that could be outdated, such as \
             prices, events, current weather, or newly opened places.",
            "When using information from the city guide, use a phrase like \
             'According to the city guide...' or 'The city guide mentions...' to cite your source.",
            "When using information from a web search, use a phrase like \
             'A recent search shows...' or 'Current information indicates...'.",
            "Blend the information from both sources naturally within a single response. \
             Do not simply concatenate them.",
            "If information from the city guide conflicts with web search results, acknowledge \
             the conflict explicitly (e.g., 'The city guide mentions X, but a recent search \
             shows Y...').",
        ];

        let mut text = format!(
            "You are a helpful AI concierge for {city}. You have access to both a knowledge base \
             built from a city guide and a web search tool for current information. \
             You MUST follow these rules when generating a response:"
        );
        for (i, rule) in rules.iter().enumerate() {
            text.push_str(&format!("\n{}. {}", i + 1, rule));
        }
        text
    }

    fn persona_directive(&self, persona: PersonaState) -> String {
        let city = &self.city;
        match persona {
            PersonaState::Tourist => format!(
                "Your user is a visitor to {city} (any duration). Be enthusiastic and \
                 VERY CONCISE (2-3 sentences max). Focus on top attractions, must-eat places, \
                 and photogenic spots. Keep responses short and actionable. DO NOT ask \
                 follow-up questions - provide direct, specific recommendations immediately. \
                 Adapt recommendations to the time available mentioned by the user."
            ),
            PersonaState::NewResident => format!(
                "Your user is a new resident moving to {city}. Be practical and CONCISE \
                 (3-4 sentences max). Focus on neighborhoods, cost of living, transportation, and \
                 essential services. Provide specific, actionable advice. DO NOT ask follow-up \
                 questions - give direct answers immediately."
            ),
            PersonaState::Unknown => "The user's persona is unknown. Ask clarifying questions \
                 about whether they are visiting or moving here, and what they need, before \
                 giving detailed recommendations."
                .to_string(),
        }
    }
}
