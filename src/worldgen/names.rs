use crate::model::Gender;
use crate::rng::WorldRng;

/// Produces character names. World generation retries on collisions, so an
/// implementation only needs a large enough space, not uniqueness.
pub trait NameGenerator {
    fn generate(&self, race: &str, gender: Gender, rng: &mut WorldRng) -> String;
}

struct Syllables {
    prefixes: &'static [&'static str],
    male: &'static [&'static str],
    female: &'static [&'static str],
    families: &'static [&'static str],
}

const ELVEN: Syllables = Syllables {
    prefixes: &[
        "Ae", "Al", "Ar", "Cel", "El", "Fae", "Gal", "Ith", "Lae", "Lor", "Mir", "Nae", "Sil",
        "Tha", "Vae", "Ys",
    ],
    male: &["andir", "ion", "orn", "ith", "aril", "eth", "uin", "oth"],
    female: &["wen", "iel", "ara", "eth", "riel", "issa", "wyn", "anna"],
    families: &[
        "Dawnwhisper", "Moonbrook", "Starleaf", "Silverbough", "Nightbloom", "Windsong",
        "Duskmantle", "Sunveil", "Mistral", "Thornglade", "Evenstar", "Willowmere",
    ],
};

const DWARVEN: Syllables = Syllables {
    prefixes: &[
        "Bal", "Bor", "Brom", "Dur", "Dwal", "Gim", "Gor", "Har", "Kaz", "Mor", "Nor", "Thor",
        "Thra", "Ul", "Dag", "Fund",
    ],
    male: &["in", "ar", "ek", "grim", "dur", "rik", "bur", "on"],
    female: &["ra", "hild", "dis", "una", "ga", "ris", "wyn", "dra"],
    families: &[
        "Ironhand", "Stonemark", "Deepdelver", "Anvilborn", "Copperbeard", "Hammerfall",
        "Goldvein", "Forgeheart", "Granitefist", "Emberhelm", "Coalbrow", "Runekeeper",
    ],
};

const BESTIAL: Syllables = Syllables {
    prefixes: &[
        "Gr", "Kr", "Sn", "Zug", "Mug", "Rak", "Gob", "Nar", "Ug", "Skar", "Dro", "Vug", "Grish",
        "Lurt", "Mog", "Bash",
    ],
    male: &["ak", "ash", "ok", "nak", "gul", "uk", "rot", "zag"],
    female: &["ga", "sha", "ra", "ka", "uzi", "gra", "la", "mog"],
    families: &[
        "Skullsplitter", "Bonegnaw", "Mudfoot", "Rotfang", "Ironjaw", "Bloodtusk",
        "Ashmaw", "Gutripper", "Stonefist", "Redeye", "Wormtongue", "Blackclaw",
    ],
};

const COMMON: Syllables = Syllables {
    prefixes: &[
        "Al", "Bal", "Bel", "Cal", "Cor", "Dar", "Del", "Fal", "Gar", "Hal", "Kel", "Mar",
        "Ral", "Sel", "Tor", "Val",
    ],
    male: &["an", "ar", "en", "ric", "us", "on", "or", "id"],
    female: &["ia", "a", "wen", "ra", "is", "ene", "ina", "ys"],
    families: &[
        "Ashford", "Blackthorn", "Brightwater", "Coldwell", "Dunmere", "Fairwind", "Greymoor",
        "Hartwood", "Longbridge", "Mossbank", "Ravencrest", "Whitevale",
    ],
};

fn syllables_for(race: &str) -> &'static Syllables {
    match race {
        "elf" | "highelf" | "darkelf" => &ELVEN,
        "dwarf" => &DWARVEN,
        "goblin" | "orc" => &BESTIAL,
        _ => &COMMON,
    }
}

/// Race-flavoured `Given Family` names built from syllable tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyllableNames;

impl NameGenerator for SyllableNames {
    fn generate(&self, race: &str, gender: Gender, rng: &mut WorldRng) -> String {
        let table = syllables_for(race);
        let endings = match gender {
            Gender::Male => table.male,
            Gender::Female => table.female,
        };
        let prefix = rng.pick(table.prefixes).copied().unwrap_or_default();
        let ending = rng.pick(endings).copied().unwrap_or_default();
        let family = rng.pick(table.families).copied().unwrap_or_default();
        format!("{prefix}{ending} {family}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_given_and_family_name() {
        let mut rng = WorldRng::from_seed(42);
        let name = SyllableNames.generate("human", Gender::Female, &mut rng);
        assert!(name.contains(' '), "name should have given and family: {name}");
    }

    #[test]
    fn deterministic() {
        let a = SyllableNames.generate("dwarf", Gender::Male, &mut WorldRng::from_seed(123));
        let b = SyllableNames.generate("dwarf", Gender::Male, &mut WorldRng::from_seed(123));
        assert_eq!(a, b);
    }

    #[test]
    fn race_picks_family_table() {
        let mut rng = WorldRng::from_seed(9);
        for _ in 0..10 {
            let name = SyllableNames.generate("dwarf", Gender::Male, &mut rng);
            let family = name.split(' ').nth(1).unwrap_or_default();
            assert!(DWARVEN.families.contains(&family), "{name}");
        }
    }

    #[test]
    fn unknown_race_uses_common_names() {
        let mut rng = WorldRng::from_seed(5);
        let name = SyllableNames.generate("merfolk", Gender::Male, &mut rng);
        let family = name.split(' ').nth(1).unwrap_or_default();
        assert!(COMMON.families.contains(&family), "{name}");
    }
}
