use crate::catalogue::{self, VERSION_SLOTS};
use crate::protocol::Bank;
use crate::registers::Register;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("received {received} raw values for a map of {expected} registers")]
pub struct LengthMismatch {
    pub expected: usize,
    pub received: usize,
}

/// Registers of one bank, keyed densely by their slot index.
#[derive(Clone, Debug)]
pub struct RegisterMap {
    registers: Vec<Register>,
}

impl RegisterMap {
    pub fn new(registers: Vec<Register>) -> Self {
        Self { registers }
    }

    pub fn parameters() -> Self {
        Self::for_bank(Bank::Parameters)
    }

    pub fn calculations() -> Self {
        Self::for_bank(Bank::Calculations)
    }

    pub fn visibilities() -> Self {
        Self::for_bank(Bank::Visibilities)
    }

    pub fn for_bank(bank: Bank) -> Self {
        Self::new(catalogue::for_bank(bank).registers())
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Register> {
        self.registers.get(index)
    }

    /// Look a register up by its controller-side name.
    pub fn find(&self, name: &str) -> Option<(usize, &Register)> {
        self.registers.iter().enumerate().find(|(_, r)| r.name() == name)
    }

    pub fn iter_sorted(&self) -> impl Iterator<Item = (usize, &Register)> {
        self.registers.iter().enumerate()
    }

    pub fn for_each_sorted(&self, mut callback: impl FnMut(usize, &Register)) {
        for (index, register) in self.iter_sorted() {
            callback(index, register);
        }
    }

    /// Registers whose last two reads differ.
    pub fn changed(&self) -> impl Iterator<Item = (usize, &Register)> {
        self.iter_sorted().filter(|(_, r)| r.has_changes())
    }

    /// Assign a freshly read vector, slot by slot. Nothing is assigned if the length is off.
    pub fn set_raw_values(&mut self, values: &[u32]) -> Result<(), LengthMismatch> {
        if values.len() != self.registers.len() {
            return Err(LengthMismatch { expected: self.registers.len(), received: values.len() });
        }
        for (register, &raw) in self.registers.iter_mut().zip(values) {
            register.set_raw(raw);
        }
        Ok(())
    }

    /// Firmware version assembled from the character slots of the calculations bank.
    pub fn version(&self) -> String {
        VERSION_SLOTS
            .filter_map(|index| self.registers.get(index))
            .map(|register| register.decode().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{Kind, Mode, Value};

    fn small_map(len: usize) -> RegisterMap {
        RegisterMap::new(
            (0..len).map(|i| Register::new(format!("R{i}"), Kind::Celsius, Mode::R_)).collect(),
        )
    }

    #[test]
    fn bank_sizes() {
        assert_eq!(RegisterMap::parameters().len(), 1126);
        assert_eq!(RegisterMap::calculations().len(), 260);
        assert_eq!(RegisterMap::visibilities().len(), 355);
        assert!(RegisterMap::new(Vec::new()).is_empty());
    }

    #[test]
    fn length_mismatch_does_not_mutate() {
        let mut map = small_map(3);
        map.set_raw_values(&[1, 2, 3]).unwrap();
        let error = map.set_raw_values(&[4, 5, 6, 7]).unwrap_err();
        assert_eq!(error, LengthMismatch { expected: 3, received: 4 });
        assert_eq!(map.set_raw_values(&[4, 5]).unwrap_err().received, 2);
        let raws = map.iter_sorted().map(|(_, r)| r.raw()).collect::<Vec<_>>();
        assert_eq!(raws, [1, 2, 3]);
        assert_eq!(map.changed().count(), 0);
    }

    #[test]
    fn iteration_is_ascending() {
        let map = RegisterMap::calculations();
        let mut previous = None;
        map.for_each_sorted(|index, _| {
            assert!(previous.is_none_or(|p| p < index));
            previous = Some(index);
        });
        assert_eq!(previous, Some(259));
    }

    #[test]
    fn changed_registers() {
        let mut map = small_map(3);
        map.set_raw_values(&[10, 20, 30]).unwrap();
        assert_eq!(map.changed().count(), 0);
        map.set_raw_values(&[10, 21, 30]).unwrap();
        let changed = map.changed().map(|(i, _)| i).collect::<Vec<_>>();
        assert_eq!(changed, [1]);
        assert_eq!(map.get(1).unwrap().decode(), Value::Real(2.1));
    }

    #[test]
    fn find_by_name() {
        let map = RegisterMap::parameters();
        let (index, register) = map.find("ID_Ba_Hz_akt").unwrap();
        assert_eq!(index, 3);
        assert!(register.is_writeable());
        assert!(map.find("ID_Nonexistent").is_none());
        assert_eq!(map.find("Unknown_Parameter_9").map(|(i, _)| i), Some(9));
    }

    #[test]
    fn version() {
        let mut map = RegisterMap::calculations();
        let mut raw = vec![0; map.len()];
        for (slot, character) in VERSION_SLOTS.zip(b"1.23.45") {
            raw[slot] = u32::from(*character);
        }
        map.set_raw_values(&raw).unwrap();
        assert_eq!(map.version(), "1.23.45");
    }

    #[test]
    fn version_stops_at_unset_characters() {
        let mut map = RegisterMap::calculations();
        let mut raw = vec![0; map.len()];
        for (slot, character) in VERSION_SLOTS.zip(b"V3.89") {
            raw[slot] = u32::from(*character);
        }
        map.set_raw_values(&raw).unwrap();
        assert_eq!(map.version(), "V3.89");
        assert_eq!(RegisterMap::calculations().version(), "");
    }
}
