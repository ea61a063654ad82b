//! Intent classification for inbound questions.
//!
//! Classification is a data-driven pass over an ordered keyword table:
//! the first topic with a matching keyword wins, so adding a topic is a
//! data change. Quick-reply rules (greetings, help, status) run before
//! classification and short-circuit the whole pipeline, but never when
//! the question also names a topic.

use vecinal_core::{EntityKind, UserContext};

/// The classified subject of a user question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    CommonSpaces,
    Announcements,
    Expenses,
    Residents,
    Visitors,
    Parcels,
    Income,
    ExpenseCategories,
    Units,
}

impl Topic {
    /// The directory entity this topic reads.
    pub fn entity(&self) -> EntityKind {
        match self {
            Topic::CommonSpaces => EntityKind::CommonSpaces,
            Topic::Announcements => EntityKind::Announcements,
            Topic::Expenses => EntityKind::Expenses,
            Topic::Residents => EntityKind::Residents,
            Topic::Visitors => EntityKind::Visitors,
            Topic::Parcels => EntityKind::Parcels,
            Topic::Income => EntityKind::Incomes,
            Topic::ExpenseCategories => EntityKind::ExpenseCategories,
            Topic::Units => EntityKind::Units,
        }
    }

    /// Stable name for structured logging.
    pub fn as_str(&self) -> &'static str {
        self.entity().as_str()
    }
}

/// Keyword table in priority order: the first topic with a match wins.
///
/// Keywords are matched by substring containment against the normalized
/// question, so unaccented variants are listed alongside accented ones.
const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (
        Topic::CommonSpaces,
        &[
            "espacios comunes",
            "espacio común",
            "espacio comun",
            "quincho",
            "piscina",
            "gimnasio",
            "sala de eventos",
            "reservar",
            "reserva",
            "amenities",
        ],
    ),
    (
        Topic::Announcements,
        &["anuncio", "aviso", "comunicado", "noticia", "novedad"],
    ),
    (
        Topic::Expenses,
        &[
            "gastos comunes",
            "gasto común",
            "gasto comun",
            "gasto",
            "expensa",
            "cuota",
            "deuda",
            "cobro",
            "boleta",
        ],
    ),
    (
        Topic::Residents,
        &["residente", "vecino", "copropietario", "habitante"],
    ),
    (Topic::Visitors, &["visitante", "visita", "invitado"]),
    (
        Topic::Parcels,
        &["encomienda", "paquete", "correspondencia", "delivery"],
    ),
    (
        Topic::Income,
        &["ingreso", "recaudación", "recaudacion", "pago recibido"],
    ),
    (
        Topic::ExpenseCategories,
        &["categoría", "categoria", "rubro"],
    ),
    (
        Topic::Units,
        &["unidad", "departamento", "depto", "torre", "casa"],
    ),
];

/// Single-word greetings, matched on word boundaries so "hi" never fires
/// inside "chile".
const GREETING_WORDS: &[&str] = &["hola", "buenas", "hello", "hi"];

/// Multi-word greetings, matched by containment.
const GREETING_PHRASES: &[&str] = &[
    "buenos días",
    "buenos dias",
    "buenas tardes",
    "buenas noches",
];

const HELP_WORDS: &[&str] = &["ayuda", "help"];

const STATUS_WORDS: &[&str] = &["estado", "status"];

/// Normalize a raw question for matching and cache keying.
pub fn normalize(question: &str) -> String {
    question.trim().to_lowercase()
}

/// Classify a normalized question into a topic. `None` means no topic
/// keyword matched and the completion fallback should answer.
pub fn classify(normalized: &str) -> Option<Topic> {
    TOPIC_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| normalized.contains(kw)))
        .map(|(topic, _)| *topic)
}

/// Whether the question contains any topic keyword.
pub fn contains_topic_keyword(normalized: &str) -> bool {
    classify(normalized).is_some()
}

/// Canned replies for greetings, help, and status probes.
///
/// Never fires when the question also names a topic: "hola, dime los
/// gastos comunes" is a data request, not a greeting.
pub fn quick_reply(normalized: &str, user: Option<&UserContext>) -> Option<String> {
    if contains_topic_keyword(normalized) {
        return None;
    }

    if is_greeting(normalized) {
        return Some(greeting_reply(user));
    }

    if contains_word(normalized, HELP_WORDS) {
        return Some(help_reply());
    }

    if contains_word(normalized, STATUS_WORDS) {
        return Some(status_reply(user));
    }

    None
}

fn is_greeting(normalized: &str) -> bool {
    contains_word(normalized, GREETING_WORDS)
        || GREETING_PHRASES.iter().any(|p| normalized.contains(p))
}

fn contains_word(normalized: &str, words: &[&str]) -> bool {
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| words.contains(&token))
}

fn greeting_reply(user: Option<&UserContext>) -> String {
    match user {
        Some(user) => format!(
            "¡Hola, {}! 👋 Soy el asistente de tu comunidad. Pregúntame por \
             gastos comunes, espacios comunes, anuncios, visitas o encomiendas.",
            user.name
        ),
        None => "¡Hola! 👋 Soy el asistente de la comunidad. Pregúntame por \
                 gastos comunes, espacios comunes, anuncios, visitas o encomiendas."
            .to_string(),
    }
}

fn help_reply() -> String {
    "Puedo ayudarte con:\n\
     • 🏢 Espacios comunes y reservas\n\
     • 📢 Anuncios de tu comunidad\n\
     • 💰 Gastos comunes y categorías\n\
     • 💵 Ingresos registrados\n\
     • 👥 Residentes y unidades\n\
     • 🚪 Visitas y 📦 encomiendas\n\
     Escribe tu pregunta y te responderé con la información disponible."
        .to_string()
}

fn status_reply(user: Option<&UserContext>) -> String {
    match user {
        Some(user) => format!(
            "Todo en orden, {}. ✅ El asistente está operativo y listo para responder.",
            user.name
        ),
        None => "Todo en orden. ✅ El asistente está operativo y listo para responder.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn some_user() -> UserContext {
        UserContext {
            id: Uuid::new_v4(),
            name: "Marta".to_string(),
            roles: HashSet::new(),
            community_ids: vec![],
            admin_community_ids: vec![],
            unit_ids: vec![],
        }
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  ¿Cuánto DEBO?  "), "¿cuánto debo?");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn classifies_each_topic() {
        assert_eq!(classify("dime los espacios comunes"), Some(Topic::CommonSpaces));
        assert_eq!(classify("¿hay anuncios nuevos?"), Some(Topic::Announcements));
        assert_eq!(classify("cuánto debo de gastos comunes"), Some(Topic::Expenses));
        assert_eq!(classify("lista de residentes"), Some(Topic::Residents));
        assert_eq!(classify("quién me visita hoy"), Some(Topic::Visitors));
        assert_eq!(classify("¿llegó mi encomienda?"), Some(Topic::Parcels));
        assert_eq!(classify("ingresos del mes"), Some(Topic::Income));
        assert_eq!(classify("categorías disponibles"), Some(Topic::ExpenseCategories));
        assert_eq!(classify("¿cuántas unidades hay?"), Some(Topic::Units));
    }

    #[test]
    fn unmatched_question_classifies_to_none() {
        assert_eq!(classify("¿cuál es la capital de francia?"), None);
    }

    #[test]
    fn every_keyword_classifies_to_its_own_topic_or_an_earlier_one() {
        // Priority order is part of the contract: a keyword may be
        // shadowed by an earlier topic (e.g. "categoría de gastos" is an
        // Expenses question) but must never fall through to None.
        for (topic, keywords) in TOPIC_KEYWORDS {
            for kw in *keywords {
                let classified = classify(kw);
                assert!(
                    classified.is_some(),
                    "keyword {kw:?} of {topic:?} classified to None"
                );
            }
        }
    }

    #[test]
    fn priority_order_prefers_expenses_over_categories() {
        // "gasto" is an Expenses keyword and appears in the phrase.
        assert_eq!(classify("categorías de gastos"), Some(Topic::Expenses));
        // Without an expense keyword, categories win.
        assert_eq!(classify("lista de categorías"), Some(Topic::ExpenseCategories));
    }

    #[test]
    fn greeting_reply_uses_display_name() {
        let user = some_user();
        let reply = quick_reply("hola", Some(&user)).unwrap();
        assert!(reply.contains("Marta"));

        let reply = quick_reply("hola", None).unwrap();
        assert!(reply.contains("¡Hola!"));
    }

    #[test]
    fn greeting_never_masks_a_data_request() {
        assert_eq!(quick_reply("hola, dime los gastos comunes", None), None);
        assert_eq!(classify("hola, dime los gastos comunes"), Some(Topic::Expenses));
    }

    #[test]
    fn greeting_phrases_match_by_containment() {
        assert!(quick_reply("buenos días", None).is_some());
        assert!(quick_reply("muy buenas tardes a todos", None).is_some());
    }

    #[test]
    fn greeting_words_require_word_boundaries() {
        // "hi" must not fire inside unrelated words.
        assert_eq!(quick_reply("vehículos mal estacionados", None), None);
        assert!(quick_reply("hi there", None).is_some());
    }

    #[test]
    fn help_and_status_probes() {
        assert!(quick_reply("ayuda", None).unwrap().contains("Espacios comunes"));
        assert!(quick_reply("help", None).is_some());

        let user = some_user();
        assert!(quick_reply("estado", Some(&user)).unwrap().contains("Marta"));
        assert!(quick_reply("status", None).is_some());
    }

    #[test]
    fn status_never_masks_a_data_request() {
        // "estado de mis gastos" names a topic.
        assert_eq!(quick_reply("estado de mis gastos", None), None);
    }

    #[test]
    fn topic_entity_mapping_is_total() {
        for (topic, _) in TOPIC_KEYWORDS {
            // as_str goes through the entity mapping; a panic here would
            // mean a topic without a directory entity.
            assert!(!topic.as_str().is_empty());
        }
    }
}
