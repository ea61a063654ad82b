//! Answer rendering: fixed replies and per-topic templates.
//!
//! Everything the chatbot ever says lives here, separate from routing,
//! so golden-output tests survive business-logic changes. All render
//! functions are pure: same (topic, scope, records) in, same text out.

use chrono::{DateTime, NaiveDate, Utc};

use vecinal_core::models::*;
use vecinal_core::{RoleClass, ScopePolicy};

use crate::classify::Topic;

// =============================================================================
// FIXED REPLIES
// =============================================================================

/// Empty or missing question.
pub const MSG_EMPTY_QUESTION: &str = "Por favor escribe tu pregunta para poder ayudarte. 🙂";

/// Directory store failure while composing a topic answer.
pub const MSG_STORE_ERROR: &str =
    "Ocurrió un error al consultar la información de tu comunidad. Intenta nuevamente en unos minutos.";

/// Completion provider credential missing.
pub const MSG_NOT_CONFIGURED: &str =
    "El asistente inteligente no está disponible en este momento. Contacta a la administración de tu comunidad.";

/// Provider rate limiting persisted through every retry.
pub const MSG_RATE_LIMITED: &str =
    "El asistente está recibiendo muchas consultas en este momento. Intenta nuevamente en unos minutos. ⏳";

/// Provider rejected the request body (HTTP 400).
pub const MSG_BAD_REQUEST: &str = "No pude procesar tu pregunta. Intenta formularla de otra manera.";

/// Provider rejected our credential (HTTP 401/403).
pub const MSG_PROVIDER_AUTH: &str =
    "El asistente no tiene acceso al servicio de respuestas en este momento. Avisa a la administración.";

/// Provider failure (HTTP 5xx and any unexpected status).
pub const MSG_PROVIDER_DOWN: &str =
    "El servicio de respuestas no está disponible en este momento. Intenta más tarde.";

/// Network failure reaching the provider.
pub const MSG_CONNECTION_ERROR: &str =
    "No pude conectarme al servicio de respuestas. Intenta nuevamente en unos minutos.";

/// Deterministic "no records" reply per topic.
pub fn empty_message(topic: Topic) -> &'static str {
    match topic {
        Topic::CommonSpaces => "No hay espacios comunes registrados para tu comunidad.",
        Topic::Announcements => "No hay anuncios publicados por el momento.",
        Topic::Expenses => "No hay gastos comunes registrados para tu comunidad.",
        Topic::Residents => "No hay residentes registrados para tu comunidad.",
        Topic::Visitors => "No hay visitas registradas.",
        Topic::Parcels => "No hay encomiendas registradas.",
        Topic::Income => "No hay ingresos registrados para tu comunidad.",
        Topic::ExpenseCategories => "No hay categorías de gasto configuradas.",
        Topic::Units => "No hay unidades registradas para tu comunidad.",
    }
}

// =============================================================================
// FORMAT HELPERS
// =============================================================================

/// Chilean peso formatting with dot thousand separators: `$1.234.567`.
pub fn format_clp(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn fmt_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

fn fmt_datetime(at: DateTime<Utc>) -> String {
    at.format("%d-%m-%Y %H:%M").to_string()
}

fn snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

// =============================================================================
// TOPIC TEMPLATES
// =============================================================================

pub fn render_common_spaces(scope: &ScopePolicy, spaces: &[CommonSpace]) -> String {
    let mut out = String::from("🏢 Espacios comunes disponibles:\n");
    for space in spaces {
        out.push_str(&format!("• {}", space.name));
        if let Some(capacity) = space.capacity {
            out.push_str(&format!(" — capacidad {capacity} personas"));
        }
        if space.requires_reservation {
            out.push_str(" (requiere reserva)");
        }
        out.push('\n');
        if let Some(hours) = &space.open_hours {
            out.push_str(&format!("  Horario: {hours}\n"));
        }
    }
    match scope.class() {
        RoleClass::Concierge => {
            out.push_str("Como conserje puedes gestionar las reservas de estos espacios.");
        }
        RoleClass::Resident => {
            out.push_str("Puedes reservarlos desde la sección Reservas de la aplicación.");
        }
        _ => {
            out.pop();
        }
    }
    out
}

pub fn render_announcements(announcements: &[Announcement]) -> String {
    let mut out = String::from("📢 Últimos anuncios:\n");
    for a in announcements {
        out.push_str(&format!(
            "• [{}] {}\n  {}\n",
            fmt_datetime(a.published_at),
            a.title,
            snippet(&a.body, 120)
        ));
    }
    out.pop();
    out
}

pub fn render_expenses(expenses: &[Expense]) -> String {
    let mut out = String::from("💰 Gastos comunes recientes:\n");
    for e in expenses {
        let status = if e.paid { "pagado ✅" } else { "pendiente ⏳" };
        out.push_str(&format!(
            "• Período {}: {} — vence {} ({})\n",
            e.period,
            format_clp(e.amount),
            fmt_date(e.due_date),
            status
        ));
    }
    out.pop();
    out
}

pub fn render_residents(scope: &ScopePolicy, residents: &[Resident]) -> String {
    let mut out = String::from("👥 Residentes:\n");
    for r in residents {
        out.push_str(&format!("• {}", r.name));
        if scope.include_contact_details() {
            if let Some(email) = &r.email {
                out.push_str(&format!(" — {email}"));
            }
            if let Some(phone) = &r.phone {
                out.push_str(&format!(" — {phone}"));
            }
        }
        out.push('\n');
    }
    out.pop();
    out
}

pub fn render_visitors(visitors: &[Visitor]) -> String {
    let mut out = String::from("🚪 Visitas recientes:\n");
    for v in visitors {
        out.push_str(&format!("• {} — ingreso {}", v.name, fmt_datetime(v.entered_at)));
        if let Some(left_at) = v.left_at {
            out.push_str(&format!(" (salida {})", fmt_datetime(left_at)));
        }
        out.push('\n');
    }
    out.pop();
    out
}

pub fn render_parcels(parcels: &[Parcel]) -> String {
    let mut out = String::from("📦 Encomiendas:\n");
    for p in parcels {
        out.push_str(&format!("• {}", p.description));
        if let Some(carrier) = &p.carrier {
            out.push_str(&format!(" ({carrier})"));
        }
        out.push_str(&format!(" — recibida {}", fmt_datetime(p.received_at)));
        match p.picked_up_at {
            Some(at) => out.push_str(&format!(" — retirada {}", fmt_datetime(at))),
            None => out.push_str(" — pendiente de retiro"),
        }
        out.push('\n');
    }
    out.pop();
    out
}

pub fn render_incomes(incomes: &[Income]) -> String {
    let mut out = String::from("💵 Ingresos recientes:\n");
    for i in incomes {
        out.push_str(&format!(
            "• {}: {} — {}\n",
            i.description,
            format_clp(i.amount),
            fmt_datetime(i.received_at)
        ));
    }
    out.pop();
    out
}

pub fn render_expense_categories(categories: &[ExpenseCategory]) -> String {
    let mut out = String::from("🗂️ Categorías de gasto:\n");
    for c in categories {
        out.push_str(&format!("• {}", c.name));
        if let Some(description) = &c.description {
            out.push_str(&format!(" — {description}"));
        }
        out.push('\n');
    }
    out.pop();
    out
}

pub fn render_units(units: &[Unit]) -> String {
    let mut out = String::from("🏠 Unidades:\n");
    for u in units {
        out.push_str(&format!("• {}", u.label));
        if let Some(tower) = &u.tower {
            out.push_str(&format!(" (Torre {tower})"));
        }
        out.push('\n');
    }
    out.pop();
    out
}
