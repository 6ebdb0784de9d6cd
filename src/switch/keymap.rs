//! Switch identifiers and the hardware code lookup table

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Hardware code reported by the first switch (`BTN_1`)
pub const SWITCH_1_CODE: u16 = 257;
/// Hardware code reported by the second switch (`BTN_2`)
pub const SWITCH_2_CODE: u16 = 258;

/// Logical identifier of a switch, independent of its hardware code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SwitchId(pub u8);

impl SwitchId {
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable description of one physical switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchDescriptor {
    /// Name shown to the operator
    pub name: &'static str,
    /// Logical identifier
    pub id: SwitchId,
    /// Key code emitted by the input subsystem
    pub code: u16,
}

impl SwitchDescriptor {
    pub const fn new(name: &'static str, id: u8, code: u16) -> Self {
        Self {
            name,
            id: SwitchId(id),
            code,
        }
    }
}

/// Ordered set of switches with lookup by hardware code.
///
/// Iteration follows the order in which the switches are expected to be
/// pressed during the automated test.
#[derive(Debug, Clone)]
pub struct SwitchTable {
    switches: Vec<SwitchDescriptor>,
    by_code: HashMap<u16, usize>,
}

impl SwitchTable {
    pub fn new(switches: Vec<SwitchDescriptor>) -> Self {
        let by_code = switches
            .iter()
            .enumerate()
            .map(|(index, switch)| (switch.code, index))
            .collect();
        Self { switches, by_code }
    }

    /// Find the switch that emits `code`
    pub fn lookup(&self, code: u16) -> Option<&SwitchDescriptor> {
        self.by_code.get(&code).map(|&index| &self.switches[index])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SwitchDescriptor> {
        self.switches.iter()
    }
}

impl Default for SwitchTable {
    fn default() -> Self {
        SWITCHES.clone()
    }
}

impl<'a> IntoIterator for &'a SwitchTable {
    type Item = &'a SwitchDescriptor;
    type IntoIter = std::slice::Iter<'a, SwitchDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The two switches wired to the board, in test order
pub static SWITCHES: LazyLock<SwitchTable> = LazyLock::new(|| {
    SwitchTable::new(vec![
        SwitchDescriptor::new("Switch 1", 1, SWITCH_1_CODE),
        SwitchDescriptor::new("Switch 2", 2, SWITCH_2_CODE),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_two_switches_in_order() {
        let table = SwitchTable::default();
        let ids: Vec<u8> = table.iter().map(|s| s.id.as_u8()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn lookup_by_code() {
        let table = SwitchTable::default();
        assert_eq!(table.lookup(SWITCH_1_CODE).map(|s| s.id), Some(SwitchId(1)));
        assert_eq!(table.lookup(SWITCH_2_CODE).map(|s| s.name), Some("Switch 2"));
    }

    #[test]
    fn lookup_unknown_code_misses() {
        let table = SwitchTable::default();
        assert!(table.lookup(30).is_none());
        assert!(table.lookup(0).is_none());
    }

    #[test]
    fn switch_id_display() {
        assert_eq!(SwitchId(2).to_string(), "2");
    }
}
