use serde::{Deserialize, Serialize};
use std::fmt;

/// Map a match was played on. `Other` is the sentinel for unrecognised maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Battleground {
    AlteracPass,
    BattlefieldOfEternity,
    BlackheartsBay,
    BraxisHoldout,
    BraxisOutpost,
    CheckpointHanamura,
    CursedHollow,
    DragonShire,
    EscapeFromBraxis,
    EscapeFromBraxisHeroic,
    GardenOfTerror,
    HanamuraTemple,
    HauntedMines,
    IndustrialDistrict,
    InfernalShrines,
    LostCavern,
    PullParty,
    SilverCity,
    SkyTemple,
    TombOfTheSpiderQueen,
    TowersOfDoom,
    VolskayaFoundry,
    WarheadJunction,
    Other,
}

impl Battleground {
    pub fn display_name(&self) -> &'static str {
        match self {
            Battleground::AlteracPass => "Alterac Pass",
            Battleground::BattlefieldOfEternity => "Battlefield of Eternity",
            Battleground::BlackheartsBay => "Blackheart's Bay",
            Battleground::BraxisHoldout => "Braxis Holdout",
            Battleground::BraxisOutpost => "Braxis Outpost",
            Battleground::CheckpointHanamura => "Checkpoint: Hanamura",
            Battleground::CursedHollow => "Cursed Hollow",
            Battleground::DragonShire => "Dragon Shire",
            Battleground::EscapeFromBraxis => "Escape From Braxis",
            Battleground::EscapeFromBraxisHeroic => "Escape From Braxis (Heroic)",
            Battleground::GardenOfTerror => "Garden of Terror",
            Battleground::HanamuraTemple => "Hanamura Temple",
            Battleground::HauntedMines => "Haunted Mines",
            Battleground::IndustrialDistrict => "Industrial District",
            Battleground::InfernalShrines => "Infernal Shrines",
            Battleground::LostCavern => "Lost Cavern",
            Battleground::PullParty => "Pull Party",
            Battleground::SilverCity => "Silver City",
            Battleground::SkyTemple => "Sky Temple",
            Battleground::TombOfTheSpiderQueen => "Tomb of the Spider Queen",
            Battleground::TowersOfDoom => "Towers of Doom",
            Battleground::VolskayaFoundry => "Volskaya Foundry",
            Battleground::WarheadJunction => "Warhead Junction",
            Battleground::Other => "Other",
        }
    }

    /// Number of lanes; 0 for brawl arenas and the sentinel.
    pub fn lanes(&self) -> u8 {
        match self {
            Battleground::AlteracPass
            | Battleground::BlackheartsBay
            | Battleground::CursedHollow
            | Battleground::DragonShire
            | Battleground::GardenOfTerror
            | Battleground::InfernalShrines
            | Battleground::SkyTemple
            | Battleground::TombOfTheSpiderQueen
            | Battleground::TowersOfDoom
            | Battleground::VolskayaFoundry
            | Battleground::WarheadJunction => 3,
            Battleground::BattlefieldOfEternity
            | Battleground::BraxisHoldout
            | Battleground::HanamuraTemple
            | Battleground::HauntedMines => 2,
            Battleground::BraxisOutpost
            | Battleground::IndustrialDistrict
            | Battleground::LostCavern
            | Battleground::SilverCity => 1,
            Battleground::CheckpointHanamura
            | Battleground::EscapeFromBraxis
            | Battleground::EscapeFromBraxisHeroic
            | Battleground::PullParty
            | Battleground::Other => 0,
        }
    }

    /// Resolve the internal map name written by end-of-match records.
    pub fn from_internal_name(name: &str) -> Option<Battleground> {
        let bg = match name {
            "AlteracPass" => Battleground::AlteracPass,
            "BattlefieldOfEternity" => Battleground::BattlefieldOfEternity,
            "BlackheartsBay" => Battleground::BlackheartsBay,
            "BraxisHoldout" => Battleground::BraxisHoldout,
            "BraxisOutpost" => Battleground::BraxisOutpost,
            "HanamuraPayloadPush" => Battleground::CheckpointHanamura,
            "CursedHollow" => Battleground::CursedHollow,
            "DragonShire" => Battleground::DragonShire,
            "EscapeFromBraxis" => Battleground::EscapeFromBraxis,
            "EscapeFromBraxis(Heroic)" => Battleground::EscapeFromBraxisHeroic,
            "HauntedWoods" => Battleground::GardenOfTerror,
            "Hanamura" => Battleground::HanamuraTemple,
            "HauntedMines" => Battleground::HauntedMines,
            "IndustrialDistrict" => Battleground::IndustrialDistrict,
            "Shrines" => Battleground::InfernalShrines,
            "LostCavern" => Battleground::LostCavern,
            "PullParty" => Battleground::PullParty,
            "SilverCity" => Battleground::SilverCity,
            "ControlPoints" => Battleground::SkyTemple,
            "Crypts" => Battleground::TombOfTheSpiderQueen,
            "TowersOfDoom" => Battleground::TowersOfDoom,
            "Volskaya" => Battleground::VolskayaFoundry,
            "Warhead Junction" => Battleground::WarheadJunction,
            _ => return None,
        };
        Some(bg)
    }
}

impl fmt::Display for Battleground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
