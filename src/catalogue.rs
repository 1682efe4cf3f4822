//! The three register banks of the controller, as const tables.
//!
//! Only slots with a known meaning are tabulated. The rest of each bank is filled with read-only
//! `Unknown_<Bank>_<index>` registers when a [`Catalogue`] is instantiated.

use crate::protocol::Bank;
use crate::registers::{Kind, Mode, Register};

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub index: u16,
    pub kind: Kind,
    pub mode: Mode,
    pub name: &'static str,
}

#[derive(Debug)]
pub struct Catalogue {
    bank: Bank,
    len: usize,
    entries: &'static [Entry],
}

impl Catalogue {
    pub const fn bank(&self) -> Bank {
        self.bank
    }

    /// Number of slots the controller reports for this bank.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub fn entries(&self) -> &'static [Entry] {
        self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&'static Entry> {
        let index = u16::try_from(index).ok()?;
        let position = self.entries.binary_search_by_key(&index, |e| e.index).ok()?;
        Some(&self.entries[position])
    }

    /// Fresh registers for every slot of the bank, all zero.
    pub fn registers(&self) -> Vec<Register> {
        let mut entries = self.entries.iter().peekable();
        (0..self.len)
            .map(|index| match entries.next_if(|e| usize::from(e.index) == index) {
                Some(entry) => Register::new(entry.name, entry.kind, entry.mode),
                None => Register::new(
                    format!("Unknown_{}_{index}", self.bank.singular()),
                    Kind::Unknown,
                    Mode::R_,
                ),
            })
            .collect()
    }
}

pub fn for_bank(bank: Bank) -> &'static Catalogue {
    match bank {
        Bank::Parameters => &PARAMETERS,
        Bank::Calculations => &CALCULATIONS,
        Bank::Visibilities => &VISIBILITIES,
    }
}

pub const PARAMETERS_LEN: usize = 1126;
pub const CALCULATIONS_LEN: usize = 260;
pub const VISIBILITIES_LEN: usize = 355;

/// Slots of the calculations bank holding the firmware version, one character each.
pub const VERSION_SLOTS: std::ops::RangeInclusive<usize> = 81..=87;

macro_rules! for_each_parameter {
    ($m:ident, $table:ident) => {
        $m! { $table;
            0: Unknown, R_, "ID_Transfert_LuxNet";
            1: Celsius, RW, "ID_Einst_WK_akt";
            2: Celsius, RW, "ID_Einst_BWS_akt";
            3: HEATING_MODE, RW, "ID_Ba_Hz_akt";
            4: HOT_WATER_MODE, RW, "ID_Ba_Bw_akt";
            5: HEATING_MODE, R_, "ID_Ba_Al_akt";
            6: Boolean, R_, "ID_SU_FrkdHz";
            7: Boolean, R_, "ID_SU_FrkdBw";
            8: Boolean, R_, "ID_SU_FrkdAl";
            10: Celsius, R_, "ID_Einst_HzHwMAt_akt";
            11: Celsius, RW, "ID_Einst_HzHwHKE_akt";
            12: Celsius, RW, "ID_Einst_HzHKRANH_akt";
            13: Celsius, RW, "ID_Einst_HzHKRABS_akt";
            14: Celsius, RW, "ID_Einst_HzMK1E_akt";
            15: Celsius, RW, "ID_Einst_HzMK1ANH_akt";
            16: Celsius, RW, "ID_Einst_HzMK1ABS_akt";
            17: Celsius, RW, "ID_Einst_HzFtRl_akt";
            18: Celsius, RW, "ID_Einst_HzFtMK1Vl_akt";
            20: Boolean, RW, "ID_Einst_BwTDI_akt_SO";
            21: Boolean, RW, "ID_Einst_BwTDI_akt_MO";
            22: Boolean, RW, "ID_Einst_BwTDI_akt_DI";
            23: Boolean, RW, "ID_Einst_BwTDI_akt_MI";
            24: Boolean, RW, "ID_Einst_BwTDI_akt_DO";
            25: Boolean, RW, "ID_Einst_BwTDI_akt_FR";
            26: Boolean, RW, "ID_Einst_BwTDI_akt_SA";
            27: Boolean, RW, "ID_Einst_BwTDI_akt_AllD";
            42: Celsius, RW, "ID_Einst_HzMK2E_akt";
            43: Celsius, RW, "ID_Einst_HzMK2ANH_akt";
            44: Celsius, RW, "ID_Einst_HzMK2ABS_akt";
            56: Boolean, RW, "ID_Einst_Fernwartung_akt";
            57: Celsius, RW, "ID_Einst_HzFtMK2Vl_akt";
            74: Kelvin, RW, "ID_Einst_BWS_Hyst_akt";
            88: Kelvin, RW, "ID_Einst_HRHyst_akt";
            89: Celsius, RW, "ID_Einst_TRBegr_akt";
            105: Celsius, RW, "ID_Soll_BWS_akt";
            108: COOLING_MODE, RW, "ID_Einst_BA_Kuehl_akt";
            110: Celsius, RW, "ID_Einst_KuehlFreig_akt";
            111: Celsius, RW, "ID_Einst_TAmin_akt";
            116: POOL_MODE, RW, "ID_Ba_Sw_akt";
            125: MIXED_CIRCUIT_MODE, RW, "ID_Ba_Mk1_akt";
            126: MIXED_CIRCUIT_MODE, RW, "ID_Ba_Mk2_akt";
            132: Celsius, RW, "ID_Sollwert_KuCft1_akt";
            133: Celsius, RW, "ID_Sollwert_KuCft2_akt";
            137: Hours, RW, "ID_Einst_Kuhl_Zeit_Ein_akt";
            138: Hours, RW, "ID_Einst_Kuhl_Zeit_Aus_akt";
            150: ACCESS_LEVEL, R_, "ID_Einst_Zugang_akt";
            158: Minutes, RW, "ID_Einst_SuBw_Zeit_akt";
            223: Hours2, RW, "ID_Einst_Heizgrenze_Zeit";
            224: Timestamp, R_, "ID_Einst_Fehler_Quit_Zeit";
            516: MIXED_CIRCUIT_MODE, RW, "ID_Ba_Mk3_akt";
            691: Celsius, RW, "ID_Einst_Heizgrenze_Temp";
            692: Boolean, RW, "ID_Einst_Heizgrenze";
            699: Celsius, RW, "ID_Einst_Solar_Tmax";
            882: SOLAR_MODE, RW, "ID_Einst_Solar_akt";
            894: VENTILATION_MODE, RW, "ID_Einst_BA_Lueftung_akt";
            1032: Seconds, R_, "ID_Einst_Verdichter_Stillstand";
            1087: Boolean, RW, "Silent_Mode";
        }
    };
}

macro_rules! for_each_calculation {
    ($m:ident, $table:ident) => {
        $m! { $table;
            10: Celsius, R_, "ID_WEB_Temperatur_TVL";
            11: Celsius, R_, "ID_WEB_Temperatur_TRL";
            12: Celsius, R_, "ID_WEB_Sollwert_TRL_HZ";
            13: Celsius, R_, "ID_WEB_Temperatur_TRL_ext";
            14: Celsius, R_, "ID_WEB_Temperatur_THG";
            15: Celsius, R_, "ID_WEB_Temperatur_TA";
            16: Celsius, R_, "ID_WEB_Mitteltemperatur";
            17: Celsius, R_, "ID_WEB_Temperatur_TBW";
            18: Celsius, R_, "ID_WEB_Einst_BWS_akt";
            19: Celsius, R_, "ID_WEB_Temperatur_TWE";
            20: Celsius, R_, "ID_WEB_Temperatur_TWA";
            21: Celsius, R_, "ID_WEB_Temperatur_TFB1";
            22: Celsius, R_, "ID_WEB_Sollwert_TVL_MK1";
            23: Celsius, R_, "ID_WEB_Temperatur_RFV";
            24: Celsius, R_, "ID_WEB_Temperatur_TFB2";
            25: Celsius, R_, "ID_WEB_Sollwert_TVL_MK2";
            26: Celsius, R_, "ID_WEB_Temperatur_TSK";
            27: Celsius, R_, "ID_WEB_Temperatur_TSS";
            28: Celsius, R_, "ID_WEB_Temperatur_TEE";
            29: Boolean, R_, "ID_WEB_ASDin";
            30: Boolean, R_, "ID_WEB_BWTin";
            31: Boolean, R_, "ID_WEB_EVUin";
            32: Boolean, R_, "ID_WEB_HDin";
            33: Boolean, R_, "ID_WEB_MOTin";
            34: Boolean, R_, "ID_WEB_NDin";
            35: Boolean, R_, "ID_WEB_PEXin";
            36: Boolean, R_, "ID_WEB_SWTin";
            37: Boolean, R_, "ID_WEB_AVout";
            38: Boolean, R_, "ID_WEB_BUPout";
            39: Boolean, R_, "ID_WEB_HUPout";
            40: Boolean, R_, "ID_WEB_MA1out";
            41: Boolean, R_, "ID_WEB_MZ1out";
            42: Boolean, R_, "ID_WEB_VENout";
            43: Boolean, R_, "ID_WEB_VBOout";
            44: Boolean, R_, "ID_WEB_VD1out";
            45: Boolean, R_, "ID_WEB_VD2out";
            46: Boolean, R_, "ID_WEB_ZIPout";
            47: Boolean, R_, "ID_WEB_ZUPout";
            48: Boolean, R_, "ID_WEB_ZW1out";
            49: Boolean, R_, "ID_WEB_ZW2SSTout";
            50: Boolean, R_, "ID_WEB_ZW3SSTout";
            51: Boolean, R_, "ID_WEB_FP2out";
            52: Boolean, R_, "ID_WEB_SLPout";
            53: Boolean, R_, "ID_WEB_SUPout";
            54: Boolean, R_, "ID_WEB_MZ2out";
            55: Boolean, R_, "ID_WEB_MA2out";
            56: Seconds, R_, "ID_WEB_Zaehler_BetrZeitVD1";
            57: Count, R_, "ID_WEB_Zaehler_BetrZeitImpVD1";
            58: Seconds, R_, "ID_WEB_Zaehler_BetrZeitVD2";
            59: Count, R_, "ID_WEB_Zaehler_BetrZeitImpVD2";
            60: Seconds, R_, "ID_WEB_Zaehler_BetrZeitZWE1";
            61: Seconds, R_, "ID_WEB_Zaehler_BetrZeitZWE2";
            62: Seconds, R_, "ID_WEB_Zaehler_BetrZeitZWE3";
            63: Seconds, R_, "ID_WEB_Zaehler_BetrZeitWP";
            64: Seconds, R_, "ID_WEB_Zaehler_BetrZeitHz";
            65: Seconds, R_, "ID_WEB_Zaehler_BetrZeitBW";
            66: Seconds, R_, "ID_WEB_Zaehler_BetrZeitKue";
            67: Seconds, R_, "ID_WEB_Time_WPein_akt";
            68: Seconds, R_, "ID_WEB_Time_ZWE1_akt";
            69: Seconds, R_, "ID_WEB_Time_ZWE2_akt";
            70: Seconds, R_, "ID_WEB_Timer_EinschVerz";
            71: Seconds, R_, "ID_WEB_Time_SSPAUS_akt";
            72: Seconds, R_, "ID_WEB_Time_SSPEIN_akt";
            73: Seconds, R_, "ID_WEB_Time_VDStd_akt";
            74: Seconds, R_, "ID_WEB_Time_HRM_akt";
            75: Seconds, R_, "ID_WEB_Time_HRW_akt";
            76: Seconds, R_, "ID_WEB_Time_LGS_akt";
            77: Seconds, R_, "ID_WEB_Time_SBW_akt";
            78: HEAT_PUMP_CODE, R_, "ID_WEB_Code_WP_akt";
            79: BIVALENCE_LEVEL, R_, "ID_WEB_BIV_Stufe_akt";
            80: OPERATION_MODE, R_, "ID_WEB_WP_BZ_akt";
            81: Character, R_, "ID_WEB_SoftStand_0";
            82: Character, R_, "ID_WEB_SoftStand_1";
            83: Character, R_, "ID_WEB_SoftStand_2";
            84: Character, R_, "ID_WEB_SoftStand_3";
            85: Character, R_, "ID_WEB_SoftStand_4";
            86: Character, R_, "ID_WEB_SoftStand_5";
            87: Character, R_, "ID_WEB_SoftStand_6";
            88: Character, R_, "ID_WEB_SoftStand_7";
            89: Character, R_, "ID_WEB_SoftStand_8";
            90: Character, R_, "ID_WEB_SoftStand_9";
            91: Ipv4Address, R_, "ID_WEB_AdresseIP_akt";
            92: Ipv4Address, R_, "ID_WEB_SubNetMask_akt";
            93: Ipv4Address, R_, "ID_WEB_Add_Broadcast";
            94: Ipv4Address, R_, "ID_WEB_Add_StdGateway";
            95: Timestamp, R_, "ID_WEB_ERROR_Time0";
            96: Timestamp, R_, "ID_WEB_ERROR_Time1";
            97: Timestamp, R_, "ID_WEB_ERROR_Time2";
            98: Timestamp, R_, "ID_WEB_ERROR_Time3";
            99: Timestamp, R_, "ID_WEB_ERROR_Time4";
            100: Errorcode, R_, "ID_WEB_ERROR_Nr0";
            101: Errorcode, R_, "ID_WEB_ERROR_Nr1";
            102: Errorcode, R_, "ID_WEB_ERROR_Nr2";
            103: Errorcode, R_, "ID_WEB_ERROR_Nr3";
            104: Errorcode, R_, "ID_WEB_ERROR_Nr4";
            105: Count, R_, "ID_WEB_AnzahlFehlerInSpeicher";
            106: SWITCH_OFF_FILE, R_, "ID_WEB_Switchoff_file_Nr0";
            107: SWITCH_OFF_FILE, R_, "ID_WEB_Switchoff_file_Nr1";
            108: SWITCH_OFF_FILE, R_, "ID_WEB_Switchoff_file_Nr2";
            109: SWITCH_OFF_FILE, R_, "ID_WEB_Switchoff_file_Nr3";
            110: SWITCH_OFF_FILE, R_, "ID_WEB_Switchoff_file_Nr4";
            111: Timestamp, R_, "ID_WEB_Switchoff_file_Time0";
            112: Timestamp, R_, "ID_WEB_Switchoff_file_Time1";
            113: Timestamp, R_, "ID_WEB_Switchoff_file_Time2";
            114: Timestamp, R_, "ID_WEB_Switchoff_file_Time3";
            115: Timestamp, R_, "ID_WEB_Switchoff_file_Time4";
            116: Boolean, R_, "ID_WEB_Comfort_exists";
            117: MAIN_MENU_STATUS_LINE_1, R_, "ID_WEB_HauptMenuStatus_Zeile1";
            118: MAIN_MENU_STATUS_LINE_2, R_, "ID_WEB_HauptMenuStatus_Zeile2";
            119: MAIN_MENU_STATUS_LINE_3, R_, "ID_WEB_HauptMenuStatus_Zeile3";
            120: Seconds, R_, "ID_WEB_HauptMenuStatus_Zeit";
            121: Level, R_, "ID_WEB_HauptMenuAHP_Stufe";
            122: Celsius, R_, "ID_WEB_HauptMenuAHP_Temp";
            123: Seconds, R_, "ID_WEB_HauptMenuAHP_Zeit";
            124: Boolean, R_, "ID_WEB_SH_BWW";
            125: Icon, R_, "ID_WEB_SH_HZ";
            126: Icon, R_, "ID_WEB_SH_MK1";
            127: Icon, R_, "ID_WEB_SH_MK2";
            134: Timestamp, R_, "ID_WEB_AktuelleTimeStamp";
            135: Icon, R_, "ID_WEB_SH_MK3";
            136: Celsius, R_, "ID_WEB_Sollwert_TVL_MK3";
            137: Celsius, R_, "ID_WEB_Temperatur_TFB3";
            138: Boolean, R_, "ID_WEB_MZ3out";
            139: Boolean, R_, "ID_WEB_MA3out";
            140: Boolean, R_, "ID_WEB_FP3out";
            141: Seconds, R_, "ID_WEB_Time_AbtIn";
            142: Celsius, R_, "ID_WEB_Temperatur_RFV2";
            143: Celsius, R_, "ID_WEB_Temperatur_RFV3";
            144: Icon, R_, "ID_WEB_SH_SW";
            145: Seconds, R_, "ID_WEB_Zaehler_BetrZeitSW";
            146: Boolean, R_, "ID_WEB_FreigabKuehl";
            147: Voltage, R_, "ID_WEB_AnalogIn";
            149: Icon, R_, "ID_WEB_SH_ZIP";
            150: Icon, R_, "ID_WEB_WebsrvProgrammWerteBeobachten";
            151: Energy, R_, "ID_WEB_WMZ_Heizung";
            152: Energy, R_, "ID_WEB_WMZ_Brauchwasser";
            153: Energy, R_, "ID_WEB_WMZ_Schwimmbad";
            154: Energy, R_, "ID_WEB_WMZ_Seit";
            155: Flow, R_, "ID_WEB_WMZ_Durchfluss";
            156: Voltage, R_, "ID_WEB_AnalogOut1";
            157: Voltage, R_, "ID_WEB_AnalogOut2";
            158: Seconds, R_, "ID_WEB_Time_Heissgas";
            159: Celsius, R_, "ID_WEB_Temp_Lueftung_Zuluft";
            160: Celsius, R_, "ID_WEB_Temp_Lueftung_Abluft";
            161: Seconds, R_, "ID_WEB_Zaehler_BetrZeitSolar";
            162: Voltage, R_, "ID_WEB_AnalogOut3";
            163: Voltage, R_, "ID_WEB_AnalogOut4";
            164: Voltage, R_, "ID_WEB_Out_VZU";
            165: Voltage, R_, "ID_WEB_Out_VAB";
            166: Boolean, R_, "ID_WEB_Out_VSK";
            167: Boolean, R_, "ID_WEB_Out_FRH";
            168: Voltage, R_, "ID_WEB_AnalogIn2";
            169: Voltage, R_, "ID_WEB_AnalogIn3";
            170: Boolean, R_, "ID_WEB_SAXin";
            171: Boolean, R_, "ID_WEB_SPLin";
            172: Boolean, R_, "ID_WEB_Compact_exists";
            173: Flow, R_, "ID_WEB_Durchfluss_WQ";
            174: Boolean, R_, "ID_WEB_LIN_exists";
            175: Celsius, R_, "ID_WEB_LIN_ANSAUG_VERDAMPFER";
            176: Celsius, R_, "ID_WEB_LIN_ANSAUG_VERDICHTER";
            177: Celsius, R_, "ID_WEB_LIN_VDH";
            178: Kelvin, R_, "ID_WEB_LIN_UH";
            179: Kelvin, R_, "ID_WEB_LIN_UH_Soll";
            180: Pressure, R_, "ID_WEB_LIN_HD";
            181: Pressure, R_, "ID_WEB_LIN_ND";
            182: Boolean, R_, "ID_WEB_LIN_VDH_out";
            183: Percent, R_, "ID_WEB_HZIO_PWM";
            184: Speed, R_, "ID_WEB_HZIO_VEN";
            186: Boolean, R_, "ID_WEB_HZIO_STB";
            187: Energy, R_, "ID_WEB_SEC_Qh_Soll";
            188: Energy, R_, "ID_WEB_SEC_Qh_Ist";
            189: Celsius, R_, "ID_WEB_SEC_TVL_Soll";
            191: SECONDARY_OPERATION_MODE, R_, "ID_WEB_SEC_BZ";
            193: Speed, R_, "ID_WEB_SEC_VD";
            194: Celsius, R_, "ID_WEB_SEC_VerdEVI";
            195: Celsius, R_, "ID_WEB_SEC_AnsEVI";
            196: Kelvin, R_, "ID_WEB_SEC_UEH_EVI";
            197: Kelvin, R_, "ID_WEB_SEC_UEH_EVI_S";
            198: Celsius, R_, "ID_WEB_SEC_KondTemp";
            199: Celsius, R_, "ID_WEB_SEC_FlussigEx";
            200: Celsius, R_, "ID_WEB_SEC_UK_EEV";
            201: Pressure, R_, "ID_WEB_SEC_EVI_Druck";
            202: Voltage, R_, "ID_WEB_SEC_U_Inv";
            203: Celsius, R_, "ID_WEB_Temperatur_THG_2";
            204: Celsius, R_, "ID_WEB_Temperatur_TWE_2";
            205: Celsius, R_, "ID_WEB_LIN_ANSAUG_VERDAMPFER_2";
            206: Celsius, R_, "ID_WEB_LIN_ANSAUG_VERDICHTER_2";
            207: Celsius, R_, "ID_WEB_LIN_VDH_2";
            208: Kelvin, R_, "ID_WEB_LIN_UH_2";
            209: Kelvin, R_, "ID_WEB_LIN_UH_Soll_2";
            210: Pressure, R_, "ID_WEB_LIN_HD_2";
            211: Pressure, R_, "ID_WEB_LIN_ND_2";
            212: Boolean, R_, "ID_WEB_HDin_2";
            213: Boolean, R_, "ID_WEB_AVout_2";
            214: Boolean, R_, "ID_WEB_VBOout_2";
            215: Boolean, R_, "ID_WEB_VD1out_2";
            216: Boolean, R_, "ID_WEB_LIN_VDH_out_2";
            217: SWITCH_OFF_FILE, R_, "ID_WEB_Switchoff2_Nr0";
            218: SWITCH_OFF_FILE, R_, "ID_WEB_Switchoff2_Nr1";
            219: SWITCH_OFF_FILE, R_, "ID_WEB_Switchoff2_Nr2";
            220: SWITCH_OFF_FILE, R_, "ID_WEB_Switchoff2_Nr3";
            221: SWITCH_OFF_FILE, R_, "ID_WEB_Switchoff2_Nr4";
            222: Timestamp, R_, "ID_WEB_Switchoff2_Time0";
            223: Timestamp, R_, "ID_WEB_Switchoff2_Time1";
            224: Timestamp, R_, "ID_WEB_Switchoff2_Time2";
            225: Timestamp, R_, "ID_WEB_Switchoff2_Time3";
            226: Timestamp, R_, "ID_WEB_Switchoff2_Time4";
            227: Celsius, R_, "ID_WEB_RBE_RT_Ist";
            228: Celsius, R_, "ID_WEB_RBE_RT_Soll";
            229: Celsius, R_, "ID_WEB_Temperatur_BW_oben";
            230: HEAT_PUMP_CODE, R_, "ID_WEB_Code_WP_akt_2";
            231: Frequency, R_, "ID_WEB_Freq_VD";
            232: Celsius, R_, "Vapourisation_Temperature";
            233: Celsius, R_, "Liquefaction_Temperature";
            236: Frequency, R_, "ID_WEB_Freq_VD_Soll";
            237: Frequency, R_, "ID_WEB_Freq_VD_Min";
            238: Frequency, R_, "ID_WEB_Freq_VD_Max";
            239: Kelvin, R_, "VBO_Temp_Spread_Soll";
            240: Kelvin, R_, "VBO_Temp_Spread_Ist";
            241: Percent, R_, "HUP_PWM";
            242: Kelvin, R_, "HUP_Temp_Spread_Soll";
            243: Kelvin, R_, "HUP_Temp_Spread_Ist";
            254: Flow, R_, "Flow_Rate_254";
            257: Power, R_, "Heat_Output";
            258: Version, R_, "RBE_Version";
        }
    };
}

macro_rules! for_each_visibility {
    ($m:ident, $table:ident) => {
        $m! { $table;
            0: Boolean, R_, "ID_Visi_NieAnzeigen";
            1: Boolean, R_, "ID_Visi_ImmerAnzeigen";
            2: Boolean, R_, "ID_Visi_Heizung";
            3: Boolean, R_, "ID_Visi_Brauwasser";
            4: Boolean, R_, "ID_Visi_Schwimmbad";
            5: Boolean, R_, "ID_Visi_Kuhlung";
            6: Boolean, R_, "ID_Visi_Lueftung";
            7: Boolean, R_, "ID_Visi_MK1";
            8: Boolean, R_, "ID_Visi_MK2";
            9: Boolean, R_, "ID_Visi_ThermDesinfekt";
            10: Boolean, R_, "ID_Visi_Zirkulation";
            11: Boolean, R_, "ID_Visi_KuhlTemp_SolltempMK1";
            12: Boolean, R_, "ID_Visi_KuhlTemp_SolltempMK2";
            13: Boolean, R_, "ID_Visi_KuhlTemp_ATDiffMK1";
            14: Boolean, R_, "ID_Visi_KuhlTemp_ATDiffMK2";
            15: Boolean, R_, "ID_Visi_Service_Information";
            16: Boolean, R_, "ID_Visi_Service_Einstellung";
            17: Boolean, R_, "ID_Visi_Service_Sprache";
            18: Boolean, R_, "ID_Visi_Service_DatumUhrzeit";
            19: Boolean, R_, "ID_Visi_Service_Ausheiz";
            20: Boolean, R_, "ID_Visi_Service_Anlagenkonfiguration";
            21: Boolean, R_, "ID_Visi_Service_IBNAssistant";
            22: Boolean, R_, "ID_Visi_Service_ParameterIBNZuruck";
            23: Boolean, R_, "ID_Visi_Temp_Vorlauf";
            24: Boolean, R_, "ID_Visi_Temp_Rucklauf";
            25: Boolean, R_, "ID_Visi_Temp_RL_Soll";
            26: Boolean, R_, "ID_Visi_Temp_Ruecklext";
            27: Boolean, R_, "ID_Visi_Temp_Heissgas";
            28: Boolean, R_, "ID_Visi_Temp_Aussent";
            29: Boolean, R_, "ID_Visi_Temp_BW_Ist";
            30: Boolean, R_, "ID_Visi_Temp_BW_Soll";
            31: Boolean, R_, "ID_Visi_Temp_WQ_Ein";
            32: Boolean, R_, "ID_Visi_Temp_Kaeltekreis";
            33: Boolean, R_, "ID_Visi_Temp_MK1_Vorlauf";
            34: Boolean, R_, "ID_Visi_Temp_MK1VL_Soll";
            35: Boolean, R_, "ID_Visi_Temp_Raumstation";
            36: Boolean, R_, "ID_Visi_Temp_MK2_Vorlauf";
            37: Boolean, R_, "ID_Visi_Temp_MK2VL_Soll";
            38: Boolean, R_, "ID_Visi_Temp_Solarkoll";
            39: Boolean, R_, "ID_Visi_Temp_Solarsp";
            40: Boolean, R_, "ID_Visi_Temp_Ext_Energ";
            41: Boolean, R_, "ID_Visi_IN_ASD";
            42: Boolean, R_, "ID_Visi_IN_BWT";
            43: Boolean, R_, "ID_Visi_IN_EVU";
            44: Boolean, R_, "ID_Visi_IN_HD";
            45: Boolean, R_, "ID_Visi_IN_MOT";
            46: Boolean, R_, "ID_Visi_IN_ND";
            47: Boolean, R_, "ID_Visi_IN_PEX";
            48: Boolean, R_, "ID_Visi_IN_SWT";
            49: Boolean, R_, "ID_Visi_OUT_Abtauventil";
            50: Boolean, R_, "ID_Visi_OUT_BUP";
            51: Boolean, R_, "ID_Visi_OUT_FUP1";
            52: Boolean, R_, "ID_Visi_OUT_HUP";
            53: Boolean, R_, "ID_Visi_OUT_Mischer1Auf";
            54: Boolean, R_, "ID_Visi_OUT_Mischer1Zu";
            55: Boolean, R_, "ID_Visi_OUT_Ventilation";
            56: Boolean, R_, "ID_Visi_OUT_Ventil_BOSUP";
            57: Boolean, R_, "ID_Visi_OUT_Verdichter1";
            58: Boolean, R_, "ID_Visi_OUT_Verdichter2";
            59: Boolean, R_, "ID_Visi_OUT_ZIP";
            60: Boolean, R_, "ID_Visi_OUT_ZUP";
            61: Boolean, R_, "ID_Visi_OUT_ZWE1";
            62: Boolean, R_, "ID_Visi_OUT_ZWE2_SST";
            63: Boolean, R_, "ID_Visi_OUT_ZWE3";
            64: Boolean, R_, "ID_Visi_OUT_FUP2";
            65: Boolean, R_, "ID_Visi_OUT_SLP";
            66: Boolean, R_, "ID_Visi_OUT_SUP";
            67: Boolean, R_, "ID_Visi_OUT_Mischer2Auf";
            68: Boolean, R_, "ID_Visi_OUT_Mischer2Zu";
        }
    };
}

macro_rules! make_entries {
    ($table: ident; $($index: literal: $kind: ident, $mode: ident, $name: literal;)+) => {
        static $table: &[Entry] = &[$(Entry {
            index: $index,
            kind: Kind::$kind,
            mode: Mode::$mode,
            name: $name,
        }),*];
    };
}

for_each_parameter!(make_entries, PARAMETER_ENTRIES);
for_each_calculation!(make_entries, CALCULATION_ENTRIES);
for_each_visibility!(make_entries, VISIBILITY_ENTRIES);

const fn assert_tabulated(entries: &[Entry], len: usize) {
    let mut index = 0;
    while index < entries.len() {
        if entries[index].index as usize >= len {
            panic!("catalogue entry lies outside of its bank");
        }
        if index > 0 && entries[index - 1].index >= entries[index].index {
            panic!("catalogue is not sorted (or has duplicate indices)");
        }
        index += 1;
    }
}

const _: () = assert_tabulated(PARAMETER_ENTRIES, PARAMETERS_LEN);
const _: () = assert_tabulated(CALCULATION_ENTRIES, CALCULATIONS_LEN);
const _: () = assert_tabulated(VISIBILITY_ENTRIES, VISIBILITIES_LEN);

pub static PARAMETERS: Catalogue = Catalogue {
    bank: Bank::Parameters,
    len: PARAMETERS_LEN,
    entries: PARAMETER_ENTRIES,
};

pub static CALCULATIONS: Catalogue = Catalogue {
    bank: Bank::Calculations,
    len: CALCULATIONS_LEN,
    entries: CALCULATION_ENTRIES,
};

pub static VISIBILITIES: Catalogue = Catalogue {
    bank: Bank::Visibilities,
    len: VISIBILITIES_LEN,
    entries: VISIBILITY_ENTRIES,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::Class;

    #[test]
    fn gaps_are_unknown_and_read_only() {
        let registers = PARAMETERS.registers();
        assert_eq!(registers.len(), PARAMETERS_LEN);
        assert_eq!(registers[9].name(), "Unknown_Parameter_9");
        assert_eq!(registers[9].kind(), Kind::Unknown);
        assert!(!registers[9].is_writeable());
        assert_eq!(registers[1125].name(), "Unknown_Parameter_1125");
        assert_eq!(CALCULATIONS.registers()[0].name(), "Unknown_Calculation_0");
        assert_eq!(VISIBILITIES.registers()[354].name(), "Unknown_Visibility_354");
    }

    #[test]
    fn tabulated_entries_land_on_their_slot() {
        for catalogue in [&PARAMETERS, &CALCULATIONS, &VISIBILITIES] {
            let registers = catalogue.registers();
            for entry in catalogue.entries() {
                let register = &registers[usize::from(entry.index)];
                assert_eq!(register.name(), entry.name);
                assert_eq!(register.kind(), entry.kind);
                assert_eq!(register.mode(), entry.mode);
            }
        }
    }

    #[test]
    fn version_slots_are_characters() {
        for index in VERSION_SLOTS {
            assert_eq!(CALCULATIONS.entry(index).map(|e| e.kind), Some(Kind::Character));
        }
    }

    #[test]
    fn calculations_are_read_only() {
        for catalogue in [&CALCULATIONS, &VISIBILITIES] {
            assert!(catalogue.entries().iter().all(|e| !e.mode.is_writeable()));
        }
        let flow = CALCULATIONS.entry(10).unwrap();
        assert_eq!(flow.name, "ID_WEB_Temperatur_TVL");
        assert_eq!(flow.kind.class(), Class::Temperature);
        assert!(CALCULATIONS.entry(9).is_none());
        assert!(CALCULATIONS.entry(100_000).is_none());
    }

    #[test]
    fn names_are_unique() {
        for catalogue in [&PARAMETERS, &CALCULATIONS, &VISIBILITIES] {
            let mut names = catalogue.entries().iter().map(|e| e.name).collect::<Vec<_>>();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len());
        }
    }
}
