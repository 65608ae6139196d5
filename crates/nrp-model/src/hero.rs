//! Hero roster.
//!
//! Two lookup tables resolve decoder strings to heroes:
//! - internal names, as written by pick/ban and end-of-match records
//! - 4-character short codes, as written into the attributes stream
//!
//! The tables are independent reference data. Neither is derived from the
//! other; both are checked against the roster in the tests below.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Tank,
    Bruiser,
    RangedAssassin,
    MeleeAssassin,
    Healer,
    Support,
}

impl Role {
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Tank => "Tank",
            Role::Bruiser => "Bruiser",
            Role::RangedAssassin => "Ranged Assassin",
            Role::MeleeAssassin => "Melee Assassin",
            Role::Healer => "Healer",
            Role::Support => "Support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

macro_rules! roster {
    ($($variant:ident = ($id:literal, $name:literal, $role:ident)),+ $(,)?) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum Hero {
            $($variant,)+
        }

        impl Hero {
            pub const ALL: &'static [Hero] = &[$(Hero::$variant,)+];

            /// Stable catalog id (1-based, alphabetical by display name).
            pub fn id(&self) -> u32 {
                match self {
                    $(Hero::$variant => $id,)+
                }
            }

            pub fn display_name(&self) -> &'static str {
                match self {
                    $(Hero::$variant => $name,)+
                }
            }

            pub fn role(&self) -> Role {
                match self {
                    $(Hero::$variant => Role::$role,)+
                }
            }
        }
    };
}

roster! {
    Abathur = (1, "Abathur", Support),
    Alarak = (2, "Alarak", MeleeAssassin),
    Alexstrasza = (3, "Alexstrasza", Healer),
    Ana = (4, "Ana", Healer),
    Anduin = (5, "Anduin", Healer),
    Anubarak = (6, "Anub'arak", Tank),
    Artanis = (7, "Artanis", Bruiser),
    Arthas = (8, "Arthas", Tank),
    Auriel = (9, "Auriel", Healer),
    Azmodan = (10, "Azmodan", RangedAssassin),
    Blaze = (11, "Blaze", Tank),
    Brightwing = (12, "Brightwing", Healer),
    Cassia = (13, "Cassia", RangedAssassin),
    Chen = (14, "Chen", Bruiser),
    Cho = (15, "Cho", Tank),
    Chromie = (16, "Chromie", RangedAssassin),
    DVa = (17, "D.Va", Bruiser),
    Deathwing = (18, "Deathwing", Bruiser),
    DeckardCain = (19, "Deckard Cain", Healer),
    Dehaka = (20, "Dehaka", Bruiser),
    Diablo = (21, "Diablo", Tank),
    Etc = (22, "E.T.C.", Tank),
    Falstad = (23, "Falstad", RangedAssassin),
    Fenix = (24, "Fenix", RangedAssassin),
    Gall = (25, "Gall", RangedAssassin),
    Garrosh = (26, "Garrosh", Tank),
    Gazlowe = (27, "Gazlowe", Bruiser),
    Genji = (28, "Genji", RangedAssassin),
    Greymane = (29, "Greymane", RangedAssassin),
    Guldan = (30, "Gul'dan", RangedAssassin),
    Hanzo = (31, "Hanzo", RangedAssassin),
    Hogger = (32, "Hogger", Bruiser),
    Illidan = (33, "Illidan", MeleeAssassin),
    Imperius = (34, "Imperius", Bruiser),
    Jaina = (35, "Jaina", RangedAssassin),
    Johanna = (36, "Johanna", Tank),
    Junkrat = (37, "Junkrat", RangedAssassin),
    Kaelthas = (38, "Kael'thas", RangedAssassin),
    KelThuzad = (39, "Kel'Thuzad", RangedAssassin),
    Kerrigan = (40, "Kerrigan", MeleeAssassin),
    Kharazim = (41, "Kharazim", Healer),
    Leoric = (42, "Leoric", Bruiser),
    LiLi = (43, "Li Li", Healer),
    LiMing = (44, "Li-Ming", RangedAssassin),
    LtMorales = (45, "Lt. Morales", Healer),
    Lunara = (46, "Lunara", RangedAssassin),
    Lucio = (47, "Lúcio", Healer),
    Maiev = (48, "Maiev", MeleeAssassin),
    MalGanis = (49, "Mal'Ganis", Tank),
    Malfurion = (50, "Malfurion", Healer),
    Malthael = (51, "Malthael", Bruiser),
    Medivh = (52, "Medivh", Support),
    Mei = (53, "Mei", Tank),
    Mephisto = (54, "Mephisto", RangedAssassin),
    Muradin = (55, "Muradin", Tank),
    Murky = (56, "Murky", MeleeAssassin),
    Nazeebo = (57, "Nazeebo", RangedAssassin),
    Nova = (58, "Nova", RangedAssassin),
    Orphea = (59, "Orphea", RangedAssassin),
    Probius = (60, "Probius", RangedAssassin),
    Qhira = (61, "Qhira", MeleeAssassin),
    Ragnaros = (62, "Ragnaros", Bruiser),
    Raynor = (63, "Raynor", RangedAssassin),
    Rehgar = (64, "Rehgar", Healer),
    Rexxar = (65, "Rexxar", Bruiser),
    Samuro = (66, "Samuro", MeleeAssassin),
    SgtHammer = (67, "Sgt. Hammer", RangedAssassin),
    Sonya = (68, "Sonya", Bruiser),
    Stitches = (69, "Stitches", Tank),
    Stukov = (70, "Stukov", Healer),
    Sylvanas = (71, "Sylvanas", RangedAssassin),
    Tassadar = (72, "Tassadar", RangedAssassin),
    TheButcher = (73, "The Butcher", MeleeAssassin),
    TheLostVikings = (74, "The Lost Vikings", Support),
    Thrall = (75, "Thrall", Bruiser),
    Tracer = (76, "Tracer", RangedAssassin),
    Tychus = (77, "Tychus", RangedAssassin),
    Tyrael = (78, "Tyrael", Tank),
    Tyrande = (79, "Tyrande", Healer),
    Uther = (80, "Uther", Healer),
    Valeera = (81, "Valeera", MeleeAssassin),
    Valla = (82, "Valla", RangedAssassin),
    Varian = (83, "Varian", Bruiser),
    Whitemane = (84, "Whitemane", Healer),
    Xul = (85, "Xul", Bruiser),
    Yrel = (86, "Yrel", Bruiser),
    Zagara = (87, "Zagara", RangedAssassin),
    Zarya = (88, "Zarya", Support),
    Zeratul = (89, "Zeratul", MeleeAssassin),
    Zuljin = (90, "Zul'jin", RangedAssassin),
}

/// Internal hero names as written by draft and end-of-match records.
const INTERNAL_NAMES: &[(&str, Hero)] = &[
    ("Abathur", Hero::Abathur),
    ("Alarak", Hero::Alarak),
    ("Alexstrasza", Hero::Alexstrasza),
    ("Ana", Hero::Ana),
    ("Anduin", Hero::Anduin),
    ("Anubarak", Hero::Anubarak),
    ("Artanis", Hero::Artanis),
    ("Arthas", Hero::Arthas),
    ("Auriel", Hero::Auriel),
    ("Azmodan", Hero::Azmodan),
    ("Firebat", Hero::Blaze),
    ("FaerieDragon", Hero::Brightwing),
    ("Amazon", Hero::Cassia),
    ("Chen", Hero::Chen),
    ("Cho", Hero::Cho),
    ("Chromie", Hero::Chromie),
    ("DVa", Hero::DVa),
    ("Deathwing", Hero::Deathwing),
    ("Deckard", Hero::DeckardCain),
    ("Dehaka", Hero::Dehaka),
    ("Diablo", Hero::Diablo),
    ("L90ETC", Hero::Etc),
    ("Falstad", Hero::Falstad),
    ("Fenix", Hero::Fenix),
    ("Gall", Hero::Gall),
    ("Garrosh", Hero::Garrosh),
    ("Tinker", Hero::Gazlowe),
    ("Genji", Hero::Genji),
    ("Greymane", Hero::Greymane),
    ("Guldan", Hero::Guldan),
    ("Hanzo", Hero::Hanzo),
    ("Hogger", Hero::Hogger),
    ("Illidan", Hero::Illidan),
    ("Imperius", Hero::Imperius),
    ("Jaina", Hero::Jaina),
    ("Crusader", Hero::Johanna),
    ("Junkrat", Hero::Junkrat),
    ("Kaelthas", Hero::Kaelthas),
    ("KelThuzad", Hero::KelThuzad),
    ("Kerrigan", Hero::Kerrigan),
    ("Monk", Hero::Kharazim),
    ("Leoric", Hero::Leoric),
    ("LiLi", Hero::LiLi),
    ("Wizard", Hero::LiMing),
    ("Medic", Hero::LtMorales),
    ("Dryad", Hero::Lunara),
    ("Lucio", Hero::Lucio),
    ("Maiev", Hero::Maiev),
    ("MalGanis", Hero::MalGanis),
    ("Malfurion", Hero::Malfurion),
    ("Malthael", Hero::Malthael),
    ("Medivh", Hero::Medivh),
    ("MeiOW", Hero::Mei),
    ("Mephisto", Hero::Mephisto),
    ("Muradin", Hero::Muradin),
    ("Murky", Hero::Murky),
    ("WitchDoctor", Hero::Nazeebo),
    ("Nova", Hero::Nova),
    ("Orphea", Hero::Orphea),
    ("Probius", Hero::Probius),
    ("NexusHunter", Hero::Qhira),
    ("Ragnaros", Hero::Ragnaros),
    ("Raynor", Hero::Raynor),
    ("Rehgar", Hero::Rehgar),
    ("Rexxar", Hero::Rexxar),
    ("Samuro", Hero::Samuro),
    ("SgtHammer", Hero::SgtHammer),
    ("Barbarian", Hero::Sonya),
    ("Stitches", Hero::Stitches),
    ("Stukov", Hero::Stukov),
    ("Sylvanas", Hero::Sylvanas),
    ("Tassadar", Hero::Tassadar),
    ("Butcher", Hero::TheButcher),
    ("LostVikings", Hero::TheLostVikings),
    ("Thrall", Hero::Thrall),
    ("Tracer", Hero::Tracer),
    ("Tychus", Hero::Tychus),
    ("Tyrael", Hero::Tyrael),
    ("Tyrande", Hero::Tyrande),
    ("Uther", Hero::Uther),
    ("Valeera", Hero::Valeera),
    ("DemonHunter", Hero::Valla),
    ("Varian", Hero::Varian),
    ("Whitemane", Hero::Whitemane),
    ("Necromancer", Hero::Xul),
    ("Yrel", Hero::Yrel),
    ("Zagara", Hero::Zagara),
    ("Zarya", Hero::Zarya),
    ("Zeratul", Hero::Zeratul),
    ("Zuljin", Hero::Zuljin),
];

/// Short codes as written into the attributes stream.
const SHORT_CODES: &[(&str, Hero)] = &[
    ("Abat", Hero::Abathur),
    ("Alar", Hero::Alarak),
    ("Alex", Hero::Alexstrasza),
    ("HANA", Hero::Ana),
    ("Andu", Hero::Anduin),
    ("Anub", Hero::Anubarak),
    ("Arts", Hero::Artanis),
    ("Arth", Hero::Arthas),
    ("Auri", Hero::Auriel),
    ("Azmo", Hero::Azmodan),
    ("Fire", Hero::Blaze),
    ("Faer", Hero::Brightwing),
    ("Amaz", Hero::Cassia),
    ("Chen", Hero::Chen),
    ("CCho", Hero::Cho),
    ("Chro", Hero::Chromie),
    ("DVA0", Hero::DVa),
    ("DEAT", Hero::Deathwing),
    ("DECK", Hero::DeckardCain),
    ("Deha", Hero::Dehaka),
    ("Diab", Hero::Diablo),
    ("L90E", Hero::Etc),
    ("Fals", Hero::Falstad),
    ("FENX", Hero::Fenix),
    ("Gall", Hero::Gall),
    ("Garr", Hero::Garrosh),
    ("Tink", Hero::Gazlowe),
    ("Genj", Hero::Genji),
    ("Genn", Hero::Greymane),
    ("Guld", Hero::Guldan),
    ("Hanz", Hero::Hanzo),
    ("HOGG", Hero::Hogger),
    ("Illi", Hero::Illidan),
    ("IMPE", Hero::Imperius),
    ("Jain", Hero::Jaina),
    ("Crus", Hero::Johanna),
    ("Junk", Hero::Junkrat),
    ("Kael", Hero::Kaelthas),
    ("KelT", Hero::KelThuzad),
    ("Kerr", Hero::Kerrigan),
    ("Monk", Hero::Kharazim),
    ("Leor", Hero::Leoric),
    ("LiLi", Hero::LiLi),
    ("Wiza", Hero::LiMing),
    ("Medi", Hero::LtMorales),
    ("Drya", Hero::Lunara),
    ("Luci", Hero::Lucio),
    ("Maie", Hero::Maiev),
    ("MalG", Hero::MalGanis),
    ("Malf", Hero::Malfurion),
    ("MALT", Hero::Malthael),
    ("Mdvh", Hero::Medivh),
    ("HMEI", Hero::Mei),
    ("MEPH", Hero::Mephisto),
    ("Mura", Hero::Muradin),
    ("Murk", Hero::Murky),
    ("Witc", Hero::Nazeebo),
    ("Nova", Hero::Nova),
    ("ORPH", Hero::Orphea),
    ("Prob", Hero::Probius),
    ("NXHU", Hero::Qhira),
    ("Ragn", Hero::Ragnaros),
    ("Rayn", Hero::Raynor),
    ("Rehg", Hero::Rehgar),
    ("Rexx", Hero::Rexxar),
    ("Samu", Hero::Samuro),
    ("Sgth", Hero::SgtHammer),
    ("Barb", Hero::Sonya),
    ("Stit", Hero::Stitches),
    ("STUK", Hero::Stukov),
    ("Sylv", Hero::Sylvanas),
    ("Tass", Hero::Tassadar),
    ("Butc", Hero::TheButcher),
    ("Lost", Hero::TheLostVikings),
    ("Thra", Hero::Thrall),
    ("Tra0", Hero::Tracer),
    ("Tych", Hero::Tychus),
    ("Tyrl", Hero::Tyrael),
    ("Tyrd", Hero::Tyrande),
    ("Uthe", Hero::Uther),
    ("VALE", Hero::Valeera),
    ("Demo", Hero::Valla),
    ("Vari", Hero::Varian),
    ("WHIT", Hero::Whitemane),
    ("Necr", Hero::Xul),
    ("YREL", Hero::Yrel),
    ("Zaga", Hero::Zagara),
    ("Zary", Hero::Zarya),
    ("Zera", Hero::Zeratul),
    ("ZULJ", Hero::Zuljin),
];

static BY_INTERNAL_NAME: LazyLock<HashMap<&'static str, Hero>> =
    LazyLock::new(|| INTERNAL_NAMES.iter().copied().collect());

static BY_SHORT_CODE: LazyLock<HashMap<&'static str, Hero>> =
    LazyLock::new(|| SHORT_CODES.iter().copied().collect());

impl Hero {
    /// Look up a hero by internal name (e.g. `"FaerieDragon"`).
    pub fn from_internal_name(name: &str) -> Option<Hero> {
        BY_INTERNAL_NAME.get(name).copied()
    }

    /// Look up a hero by attribute short code (e.g. `"Faer"`).
    pub fn from_short_code(code: &str) -> Option<Hero> {
        BY_SHORT_CODE.get(code).copied()
    }
}

impl fmt::Display for Hero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
