//! Enumerations the controller reports as plain integers.
//!
//! Tables are sparse: a code missing from a table is distinct from a code that maps to an empty
//! string (see [`POOL_MODE`]).

use crate::registers::Value;

#[derive(Debug, PartialEq, Eq)]
pub struct Codes {
    name: &'static str,
    entries: &'static [(u32, &'static str)],
}

impl Codes {
    const fn new(name: &'static str, entries: &'static [(u32, &'static str)]) -> Self {
        let mut index = 1;
        while index < entries.len() {
            assert!(entries[index - 1].0 < entries[index].0, "codes must be strictly ascending");
            index += 1;
        }
        Self { name, entries }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn entries(&self) -> &'static [(u32, &'static str)] {
        self.entries
    }

    /// One past the highest defined code.
    pub fn len(&self) -> u32 {
        self.entries.last().map_or(0, |&(code, _)| code + 1)
    }

    pub fn get(&self, code: u32) -> Option<&'static str> {
        let index = self.entries.binary_search_by_key(&code, |&(c, _)| c).ok()?;
        Some(self.entries[index].1)
    }

    pub fn position(&self, text: &str) -> Option<u32> {
        self.entries.iter().find(|(_, t)| *t == text).map(|&(code, _)| code)
    }

    pub fn decode(&self, raw: u32) -> Value {
        match self.get(raw) {
            Some(text) => Value::Text(text.to_string()),
            None => Value::Text(format!("unknown code: {raw}")),
        }
    }
}

const HEATING_MODES: &[(u32, &str)] =
    &[(0, "Automatic"), (1, "Second heatsource"), (2, "Party"), (3, "Holidays"), (4, "Off")];

const COOLING_MODES: &[(u32, &str)] = &[(0, "Off"), (1, "Automatic")];

pub static HEATING_MODE: Codes = Codes::new("heating_mode", HEATING_MODES);

pub static HOT_WATER_MODE: Codes = Codes::new("hot_water_mode", HEATING_MODES);

pub static POOL_MODE: Codes = Codes::new(
    "pool_mode",
    &[(0, "Automatic"), (1, ""), (2, "Party"), (3, "Holidays"), (4, "Off")],
);

pub static COOLING_MODE: Codes = Codes::new("cooling_mode", COOLING_MODES);

pub static SOLAR_MODE: Codes = Codes::new("solar_mode", COOLING_MODES);

pub static VENTILATION_MODE: Codes = Codes::new(
    "ventilation_mode",
    &[(0, "Automatic"), (1, "Party"), (2, "Holidays"), (3, "Off")],
);

pub static MIXED_CIRCUIT_MODE: Codes = Codes::new(
    "mixed_circuit_mode",
    &[(0, "Automatic"), (2, "Party"), (3, "Holidays"), (4, "Off")],
);

pub static ACCESS_LEVEL: Codes = Codes::new(
    "access_level",
    &[(0, "user"), (1, "after sales service"), (2, "manufacturer"), (3, "installer")],
);

pub static BIVALENCE_LEVEL: Codes = Codes::new(
    "bivalence_level",
    &[
        (1, "one compressor allowed to run"),
        (2, "two compressors allowed to run"),
        (3, "additional heat generator allowed to run"),
    ],
);

pub static OPERATION_MODE: Codes = Codes::new(
    "operation_mode",
    &[
        (0, "heating"),
        (1, "hot water"),
        (2, "swimming pool/solar"),
        (3, "evu"),
        (4, "defrost"),
        (5, "no request"),
        (6, "heating external source"),
        (7, "cooling"),
    ],
);

pub static SECONDARY_OPERATION_MODE: Codes = Codes::new(
    "secondary_operation_mode",
    &[
        (0, "off"),
        (1, "cooling"),
        (2, "heating"),
        (3, "fault"),
        (4, "transition"),
        (5, "defrost"),
        (6, "waiting"),
        (7, "waiting"),
        (8, "transition"),
        (9, "stop"),
        (10, "manual"),
        (11, "simulation start"),
        (12, "evu lock"),
    ],
);

// The index is the code the heat pump reports, do not renumber.
pub static HEAT_PUMP_CODE: Codes = Codes::new(
    "heat_pump_code",
    &[
        (0, "ERC"),
        (1, "SW1"),
        (2, "SW2"),
        (3, "WW1"),
        (4, "WW2"),
        (5, "L1I"),
        (6, "L2I"),
        (7, "L1A"),
        (8, "L2A"),
        (9, "KSW"),
        (10, "KLW"),
        (11, "SWC"),
        (12, "LWC"),
        (13, "L2G"),
        (14, "WZS"),
        (15, "L1I407"),
        (16, "L2I407"),
        (17, "L1A407"),
        (18, "L2A407"),
        (19, "L2G407"),
        (20, "LWC407"),
        (21, "L1AREV"),
        (22, "L2AREV"),
        (23, "WWC1"),
        (24, "WWC2"),
        (25, "L2G404"),
        (26, "WZW"),
        (27, "L1S"),
        (28, "L1H"),
        (29, "L2H"),
        (30, "WZWD"),
        (31, "ERC"),
        (40, "WWB_20"),
        (41, "LD5"),
        (42, "LD7"),
        (43, "SW 37_45"),
        (44, "SW 58_69"),
        (45, "SW 29_56"),
        (46, "LD5 (230V)"),
        (47, "LD7 (230 V)"),
        (48, "LD9"),
        (49, "LD5 REV"),
        (50, "LD7 REV"),
        (51, "LD5 REV 230V"),
        (52, "LD7 REV 230V"),
        (53, "LD9 REV 230V"),
        (54, "SW 291"),
        (55, "LW SEC"),
        (56, "HMD 2"),
        (57, "MSW 4"),
        (58, "MSW 6"),
        (59, "MSW 8"),
        (60, "MSW 10"),
        (61, "MSW 12"),
        (62, "MSW 14"),
        (63, "MSW 17"),
        (64, "MSW 19"),
        (65, "MSW 23"),
        (66, "MSW 26"),
        (67, "MSW 30"),
        (68, "MSW 4S"),
        (69, "MSW 6S"),
        (70, "MSW 8S"),
        (71, "MSW 10S"),
        (72, "MSW 13S"),
        (73, "MSW 16S"),
        (74, "MSW2-6S"),
        (75, "MSW4-16"),
        (76, "TODO unknown 76"),
        (77, "TODO unknown 77"),
        (78, "TODO unknown 78"),
        (79, "TODO unknown 79"),
        (80, "TODO unknown 80"),
        (81, "TODO unknown 81"),
        (82, "TODO unknown 82"),
    ],
);

pub static SWITCH_OFF_FILE: Codes = Codes::new(
    "switch_off_file",
    &[
        (1, "heatpump error"),
        (2, "system error"),
        (3, "evu lock"),
        (4, "operation mode second heat generator"),
        (5, "air defrost"),
        (6, "maximal usage temperature"),
        (7, "minimal usage temperature"),
        (8, "lower usage limit"),
        (9, "no request"),
        (11, "flow rate"),
        (19, "PV max"),
    ],
);

pub static MAIN_MENU_STATUS_LINE_1: Codes = Codes::new(
    "main_menu_status_line_1",
    &[
        (0, "heatpump running"),
        (1, "heatpump idle"),
        (2, "heatpump coming"),
        (3, "errorcode slot 0"),
        (4, "defrost"),
        (5, "waiting on LIN connection"),
        (6, "compressor heating up"),
        (7, "pump forerun"),
    ],
);

pub static MAIN_MENU_STATUS_LINE_2: Codes =
    Codes::new("main_menu_status_line_2", &[(0, "since"), (1, "in")]);

pub static MAIN_MENU_STATUS_LINE_3: Codes = Codes::new(
    "main_menu_status_line_3",
    &[
        (0, "heating"),
        (1, "no request"),
        (2, "grid switch on delay"),
        (3, "cycle lock"),
        (4, "lock time"),
        (5, "domestic water"),
        (6, "info bake out program"),
        (7, "defrost"),
        (8, "pump forerun"),
        (9, "thermal desinfection"),
        (10, "cooling"),
        (12, "swimming pool/solar"),
        (13, "heating external energy source"),
        (14, "domestic water external energy source"),
        (16, "flow monitoring"),
        (17, "second heat generator 1 active"),
    ],
);

pub static ALL: [&Codes; 16] = [
    &HEATING_MODE,
    &HOT_WATER_MODE,
    &POOL_MODE,
    &COOLING_MODE,
    &SOLAR_MODE,
    &VENTILATION_MODE,
    &MIXED_CIRCUIT_MODE,
    &ACCESS_LEVEL,
    &BIVALENCE_LEVEL,
    &OPERATION_MODE,
    &SECONDARY_OPERATION_MODE,
    &HEAT_PUMP_CODE,
    &SWITCH_OFF_FILE,
    &MAIN_MENU_STATUS_LINE_1,
    &MAIN_MENU_STATUS_LINE_2,
    &MAIN_MENU_STATUS_LINE_3,
];

/// Printable characters of the firmware version string, indexed by their ASCII code.
static CHARACTERS: [&str; 127] = const {
    let printable = b"#!$%&'*+-.0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ^_`abcdefghijklmnopqrstuvwxyz|~";
    let mut table = [""; 127];
    let mut index = 0;
    while index < printable.len() {
        let (_, remainder) = printable.split_at(index);
        let (character, _) = remainder.split_at(1);
        table[printable[index] as usize] = match std::str::from_utf8(character) {
            Ok(character) => character,
            Err(_) => panic!("printable characters are ASCII"),
        };
        index += 1;
    }
    table
};

pub fn character(raw: u32) -> Value {
    if raw == 0 {
        return Value::Text(String::new());
    }
    match CHARACTERS.get(raw as usize) {
        Some(character) => Value::Text(character.to_string()),
        None => Value::Text(format!("char {raw}:{raw:x} not found")),
    }
}

pub fn character_code(text: &str) -> Option<u32> {
    if text.is_empty() {
        return Some(0);
    }
    let position = CHARACTERS.iter().position(|c| !c.is_empty() && *c == text)?;
    u32::try_from(position).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: Value) -> String {
        match value {
            Value::Text(t) => t,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn every_table_is_symmetric() {
        for codes in ALL {
            for &(code, expected) in codes.entries() {
                assert_eq!(text(codes.decode(code)), expected, "{}", codes.name());
                if !expected.is_empty() {
                    let first = codes.entries().iter().find(|(_, t)| *t == expected).unwrap();
                    assert_eq!(codes.position(expected), Some(first.0), "{}", codes.name());
                }
            }
        }
    }

    #[test]
    fn gaps_are_not_empty_strings() {
        assert_eq!(text(MIXED_CIRCUIT_MODE.decode(1)), "unknown code: 1");
        assert_eq!(text(POOL_MODE.decode(1)), "");
        assert_eq!(POOL_MODE.position(""), Some(1));
        assert_eq!(MIXED_CIRCUIT_MODE.position(""), None);
        assert_eq!(text(SWITCH_OFF_FILE.decode(0)), "unknown code: 0");
        assert_eq!(text(SWITCH_OFF_FILE.decode(10)), "unknown code: 10");
        assert_eq!(text(MAIN_MENU_STATUS_LINE_3.decode(15)), "unknown code: 15");
        assert_eq!(text(HEAT_PUMP_CODE.decode(35)), "unknown code: 35");
    }

    #[test]
    fn code_equal_to_length_is_out_of_range() {
        assert_eq!(HEATING_MODE.len(), 5);
        assert_eq!(text(HEATING_MODE.decode(5)), "unknown code: 5");
        assert_eq!(text(HEATING_MODE.decode(u32::MAX)), format!("unknown code: {}", u32::MAX));
    }

    #[test]
    fn shared_tables() {
        assert_eq!(HOT_WATER_MODE.entries(), HEATING_MODE.entries());
        assert_eq!(SOLAR_MODE.entries(), COOLING_MODE.entries());
        assert_eq!(text(POOL_MODE.decode(4)), "Off");
        assert_eq!(text(BIVALENCE_LEVEL.decode(3)), "additional heat generator allowed to run");
        assert_eq!(text(HEAT_PUMP_CODE.decode(47)), "LD7 (230 V)");
        assert_eq!(text(HEAT_PUMP_CODE.decode(75)), "MSW4-16");
        assert_eq!(text(HEAT_PUMP_CODE.decode(76)), "TODO unknown 76");
        assert_eq!(text(HEAT_PUMP_CODE.decode(82)), "TODO unknown 82");
        assert_eq!(text(HEAT_PUMP_CODE.decode(83)), "unknown code: 83");
        assert_eq!(HEAT_PUMP_CODE.len(), 83);
        assert_eq!(text(SECONDARY_OPERATION_MODE.decode(12)), "evu lock");
    }

    #[test]
    fn characters() {
        assert_eq!(text(character(0)), "");
        assert_eq!(text(character(u32::from(b'V'))), "V");
        assert_eq!(text(character(u32::from(b'`'))), "`");
        assert_eq!(text(character(u32::from(b'~'))), "~");
        // Not printable in the firmware's table.
        assert_eq!(text(character(u32::from(b' '))), "");
        assert_eq!(text(character(127)), "char 127:7f not found");
        assert_eq!(text(character(300)), "char 300:12c not found");
        assert_eq!(character_code("3"), Some(u32::from(b'3')));
        assert_eq!(character_code(""), Some(0));
        assert_eq!(character_code("@"), None);
    }
}
