//! Technical combo table.
//!
//! A technical fires when a damaging hit of a matching element lands on a
//! target that carries the rule's trigger (a status or knockdown). The table
//! is data: [`TechnicalTable::standard`] is the shipped default and content
//! files may replace it entirely.
//!
//! | Trigger   | Incoming | Combo          | ×    | Consumes |
//! |-----------|----------|----------------|------|----------|
//! | Burn      | Wind     | Firestorm      | 1.5  | yes      |
//! | Burn      | Nuclear  | Meltdown       | 1.5  | yes      |
//! | Freeze    | Physical | Shatter        | 1.8  | yes      |
//! | Freeze    | Nuclear  | Flash Thaw     | 1.5  | yes      |
//! | Shock     | Physical | Overload       | 1.8  | yes      |
//! | Shock     | Nuclear  | Short Circuit  | 1.5  | yes      |
//! | Sleep     | Physical | Rude Awakening | 1.5  | yes      |
//! | Confuse   | Psychic  | Mind Break     | 1.5  | no       |
//! | Poison    | Psychic  | Neurotoxin     | 1.3  | no       |
//! | Knockdown | Gun      | Point Blank    | 1.3  | no       |
//!
//! Rules are checked in table order and the first match wins.

use crate::element::Element;
use crate::status::{StatusKind, StatusLedger};

/// Target condition a rule reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TechnicalTrigger {
    Status(StatusKind),
    Knockdown,
}

/// Incoming hit a rule reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TechnicalIncoming {
    Element(Element),
    /// Any element except Almighty.
    AnyElement,
}

impl TechnicalIncoming {
    pub fn matches(self, element: Element) -> bool {
        match self {
            TechnicalIncoming::Element(expected) => expected == element,
            TechnicalIncoming::AnyElement => element != Element::Almighty,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TechnicalRule {
    pub trigger: TechnicalTrigger,
    pub incoming: TechnicalIncoming,
    pub combo: String,
    /// Damage multiplier in percent.
    pub multiplier: u32,
    /// Whether the triggering status is removed by the combo.
    pub consumes_status: bool,
}

impl TechnicalRule {
    pub fn new(
        trigger: TechnicalTrigger,
        incoming: TechnicalIncoming,
        combo: impl Into<String>,
        multiplier: u32,
        consumes_status: bool,
    ) -> Self {
        Self {
            trigger,
            incoming,
            combo: combo.into(),
            multiplier,
            consumes_status,
        }
    }

    fn applies(&self, statuses: &StatusLedger, knocked_down: bool, element: Element) -> bool {
        let triggered = match self.trigger {
            TechnicalTrigger::Status(kind) => statuses.has(kind),
            TechnicalTrigger::Knockdown => knocked_down,
        };
        triggered && self.incoming.matches(element)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TechnicalTable {
    rules: Vec<TechnicalRule>,
}

impl TechnicalTable {
    pub fn new(rules: Vec<TechnicalRule>) -> Self {
        Self { rules }
    }

    /// The default combo table (see module docs).
    pub fn standard() -> Self {
        use Element::*;
        use StatusKind::*;
        use TechnicalIncoming::Element as On;
        use TechnicalTrigger::Status as With;

        Self::new(vec![
            TechnicalRule::new(With(Burn), On(Wind), "Firestorm", 150, true),
            TechnicalRule::new(With(Burn), On(Nuclear), "Meltdown", 150, true),
            TechnicalRule::new(With(Freeze), On(Physical), "Shatter", 180, true),
            TechnicalRule::new(With(Freeze), On(Nuclear), "Flash Thaw", 150, true),
            TechnicalRule::new(With(Shock), On(Physical), "Overload", 180, true),
            TechnicalRule::new(With(Shock), On(Nuclear), "Short Circuit", 150, true),
            TechnicalRule::new(With(Sleep), On(Physical), "Rude Awakening", 150, true),
            TechnicalRule::new(With(Confuse), On(Psychic), "Mind Break", 150, false),
            TechnicalRule::new(With(Poison), On(Psychic), "Neurotoxin", 130, false),
            TechnicalRule::new(TechnicalTrigger::Knockdown, On(Gun), "Point Blank", 130, false),
        ])
    }

    /// First rule matching the target's state and the incoming element.
    pub fn find(
        &self,
        statuses: &StatusLedger,
        knocked_down: bool,
        element: Element,
    ) -> Option<&TechnicalRule> {
        self.rules
            .iter()
            .find(|rule| rule.applies(statuses, knocked_down, element))
    }

    /// Whether some rule is triggered by `status` and completed by `element`.
    pub fn pairs(&self, status: StatusKind, element: Element) -> bool {
        self.rules.iter().any(|rule| {
            rule.trigger == TechnicalTrigger::Status(status) && rule.incoming.matches(element)
        })
    }

    pub fn rules(&self) -> &[TechnicalRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusReapply;
    use strum::IntoEnumIterator;

    fn ledger_with(kind: StatusKind) -> StatusLedger {
        let mut ledger = StatusLedger::new();
        ledger.apply(kind, 2, None, StatusReapply::Refresh);
        ledger
    }

    #[test]
    fn standard_table_matrix() {
        let table = TechnicalTable::standard();
        let expected: &[(StatusKind, Element, &str)] = &[
            (StatusKind::Burn, Element::Wind, "Firestorm"),
            (StatusKind::Burn, Element::Nuclear, "Meltdown"),
            (StatusKind::Freeze, Element::Physical, "Shatter"),
            (StatusKind::Freeze, Element::Nuclear, "Flash Thaw"),
            (StatusKind::Shock, Element::Physical, "Overload"),
            (StatusKind::Shock, Element::Nuclear, "Short Circuit"),
            (StatusKind::Sleep, Element::Physical, "Rude Awakening"),
            (StatusKind::Confuse, Element::Psychic, "Mind Break"),
            (StatusKind::Poison, Element::Psychic, "Neurotoxin"),
        ];

        for status in StatusKind::iter() {
            let ledger = ledger_with(status);
            for element in Element::iter() {
                let found = table.find(&ledger, false, element).map(|r| r.combo.as_str());
                let wanted = expected
                    .iter()
                    .find(|(s, e, _)| *s == status && *e == element)
                    .map(|(_, _, combo)| *combo);
                assert_eq!(found, wanted, "{status} × {element}");
            }
        }
    }

    #[test]
    fn knockdown_rows() {
        let table = TechnicalTable::standard();
        let clean = StatusLedger::new();
        for element in Element::iter() {
            let found = table.find(&clean, true, element).map(|r| r.combo.as_str());
            let wanted = (element == Element::Gun).then_some("Point Blank");
            assert_eq!(found, wanted, "knockdown × {element}");
        }
    }

    #[test]
    fn no_trigger_no_technical() {
        let table = TechnicalTable::standard();
        let clean = StatusLedger::new();
        for element in Element::iter() {
            assert!(table.find(&clean, false, element).is_none());
        }
    }

    #[test]
    fn custom_table_replaces_defaults() {
        let table = TechnicalTable::new(vec![TechnicalRule::new(
            TechnicalTrigger::Status(StatusKind::Burn),
            TechnicalIncoming::AnyElement,
            "Flashpoint",
            200,
            false,
        )]);
        let burning = ledger_with(StatusKind::Burn);

        assert_eq!(
            table.find(&burning, false, Element::Ice).map(|r| r.multiplier),
            Some(200)
        );
        assert!(table.find(&burning, false, Element::Almighty).is_none());
        assert!(table.pairs(StatusKind::Burn, Element::Curse));
    }
}
