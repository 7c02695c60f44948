//! Regla "Hoy No Circula"
//!
//! Función pura: a partir del último dígito de la placa, el día de la
//! semana y la hora local decide si el vehículo puede circular. La
//! restricción rige de lunes a viernes en la franja [06:00, 22:00).

use chrono::Weekday;

/// Inicio (inclusive) de la franja restringida
pub const RESTRICTION_START_HOUR: u32 = 6;
/// Fin (exclusivo) de la franja restringida
pub const RESTRICTION_END_HOUR: u32 = 22;

/// Nombre usado cuando el dígito no pertenece a la tabla
pub const UNKNOWN_DAY: &str = "UNKNOWN";

/// Motivo de la decisión, en orden de prioridad de evaluación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    WeekendExemption,
    OutsideRestrictedHours,
    NoRestrictionToday,
    RestrictedDay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionDecision {
    pub can_circulate: bool,
    pub reason: DecisionReason,
    /// Día restringido para el dígito, `None` si el dígito no es 0-9
    pub restriction_day: Option<Weekday>,
    pub message: String,
}

impl RestrictionDecision {
    pub fn restriction_day_name(&self) -> &'static str {
        self.restriction_day.map(weekday_name).unwrap_or(UNKNOWN_DAY)
    }
}

/// Tabla fija dígito → día restringido
pub fn restriction_day_for(digit: char) -> Option<Weekday> {
    match digit {
        '1' | '2' => Some(Weekday::Mon),
        '3' | '4' => Some(Weekday::Tue),
        '5' | '6' => Some(Weekday::Wed),
        '7' | '8' => Some(Weekday::Thu),
        '9' | '0' => Some(Weekday::Fri),
        _ => None,
    }
}

/// Par de dígitos que comparten el día restringido
pub fn digit_pair(day: Weekday) -> Option<(char, char)> {
    match day {
        Weekday::Mon => Some(('1', '2')),
        Weekday::Tue => Some(('3', '4')),
        Weekday::Wed => Some(('5', '6')),
        Weekday::Thu => Some(('7', '8')),
        Weekday::Fri => Some(('9', '0')),
        Weekday::Sat | Weekday::Sun => None,
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

pub fn is_restricted_hour(hour: u32) -> bool {
    (RESTRICTION_START_HOUR..RESTRICTION_END_HOUR).contains(&hour)
}

/// Evaluar la regla. Nunca falla.
pub fn evaluate(last_digit: char, day: Weekday, hour: u32) -> RestrictionDecision {
    let restriction_day = restriction_day_for(last_digit);

    let reason = if is_weekend(day) {
        DecisionReason::WeekendExemption
    } else if !is_restricted_hour(hour) {
        DecisionReason::OutsideRestrictedHours
    } else if restriction_day == Some(day) {
        DecisionReason::RestrictedDay
    } else {
        DecisionReason::NoRestrictionToday
    };

    RestrictionDecision {
        can_circulate: reason != DecisionReason::RestrictedDay,
        reason,
        restriction_day,
        message: compose_message(reason, restriction_day),
    }
}

fn compose_message(reason: DecisionReason, restriction_day: Option<Weekday>) -> String {
    match reason {
        DecisionReason::WeekendExemption => {
            "Puedes circular. No hay restricción en fin de semana".to_string()
        }
        DecisionReason::OutsideRestrictedHours => {
            "Puedes circular. Está fuera del horario de restricción (después de las 22:00 o antes de las 06:00)"
                .to_string()
        }
        DecisionReason::NoRestrictionToday => "Puedes circular sin problemas".to_string(),
        DecisionReason::RestrictedDay => {
            let digits = match restriction_day.and_then(digit_pair) {
                Some((a, b)) => format!("{} y {}", a, b),
                None => "desconocido".to_string(),
            };
            format!(
                "No puedes circular. Hoy no circula para placas que terminan en: {}",
                digits
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEEKDAYS: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    fn digits() -> impl Iterator<Item = char> {
        '0'..='9'
    }

    #[test]
    fn digit_table_is_total_and_fixed() {
        let expected = [
            ('1', Weekday::Mon),
            ('2', Weekday::Mon),
            ('3', Weekday::Tue),
            ('4', Weekday::Tue),
            ('5', Weekday::Wed),
            ('6', Weekday::Wed),
            ('7', Weekday::Thu),
            ('8', Weekday::Thu),
            ('9', Weekday::Fri),
            ('0', Weekday::Fri),
        ];
        for (digit, day) in expected {
            assert_eq!(restriction_day_for(digit), Some(day), "digit {}", digit);
        }
        assert_eq!(restriction_day_for('x'), None);
    }

    #[test]
    fn weekends_always_circulate() {
        for digit in digits() {
            for day in [Weekday::Sat, Weekday::Sun] {
                for hour in 0..24 {
                    let decision = evaluate(digit, day, hour);
                    assert!(decision.can_circulate);
                    assert_eq!(decision.reason, DecisionReason::WeekendExemption);
                }
            }
        }
    }

    #[test]
    fn outside_restricted_hours_always_circulate() {
        for digit in digits() {
            for day in WEEKDAYS {
                for hour in (0..6).chain(22..24) {
                    let decision = evaluate(digit, day, hour);
                    assert!(decision.can_circulate, "{} {:?} {}h", digit, day, hour);
                    assert_eq!(decision.reason, DecisionReason::OutsideRestrictedHours);
                }
            }
        }
    }

    #[test]
    fn restricted_only_on_matching_day_inside_window() {
        for digit in digits() {
            for day in WEEKDAYS {
                for hour in 6..22 {
                    let decision = evaluate(digit, day, hour);
                    let restricted = restriction_day_for(digit) == Some(day);
                    assert_eq!(decision.can_circulate, !restricted, "{} {:?} {}h", digit, day, hour);
                }
            }
        }
    }

    #[test]
    fn window_boundaries() {
        assert!(evaluate('1', Weekday::Mon, 5).can_circulate);
        assert!(!evaluate('1', Weekday::Mon, 6).can_circulate);
        assert!(!evaluate('1', Weekday::Mon, 21).can_circulate);
        assert!(evaluate('1', Weekday::Mon, 22).can_circulate);
    }

    #[test]
    fn restricted_message_names_digit_pair() {
        let decision = evaluate('9', Weekday::Fri, 10);
        assert!(!decision.can_circulate);
        assert_eq!(decision.reason, DecisionReason::RestrictedDay);
        assert_eq!(decision.restriction_day_name(), "FRIDAY");
        assert!(decision.message.contains("9 y 0"));
        assert!(decision.message.starts_with("No puedes circular"));
    }

    #[test]
    fn weekend_takes_priority_over_hours_in_message() {
        let decision = evaluate('1', Weekday::Sat, 23);
        assert_eq!(decision.reason, DecisionReason::WeekendExemption);
        assert!(decision.message.contains("fin de semana"));
    }

    #[test]
    fn free_day_message() {
        let decision = evaluate('1', Weekday::Tue, 9);
        assert_eq!(decision.reason, DecisionReason::NoRestrictionToday);
        assert_eq!(decision.message, "Puedes circular sin problemas");
        assert_eq!(decision.restriction_day_name(), "MONDAY");
    }

    #[test]
    fn unknown_digit_is_handled_without_failing() {
        let decision = evaluate('?', Weekday::Mon, 9);
        assert!(decision.can_circulate);
        assert_eq!(decision.restriction_day, None);
        assert_eq!(decision.restriction_day_name(), UNKNOWN_DAY);
    }
}
