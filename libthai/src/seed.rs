//! Built-in seed corpus.
//!
//! Two hand-curated lists ship with the crate:
//! - `KNOWN_MAPPINGS`: everyday words and phrases with the romanization people
//!   actually type, stored with a frequency above anything in a real corpus
//! - `ROMANIZATION_OVERRIDES`: proper nouns whose common spellings differ from
//!   any systematic romanization, keyed by Thai text
//!
//! Either list can be loaded into any `StoreWriter`.

use crate::StoreWriter;
use libthai_core::{Category, CorpusEntry, StoreError};
use phf::phf_map;

/// Frequency given to curated mappings.
pub const KNOWN_FREQUENCY: u64 = 999_999_999;

/// Added to a category's base frequency for override spellings.
pub const OVERRIDE_BOOST: u64 = 50;

/// (romanization, Thai text)
pub static KNOWN_MAPPINGS: &[(&str, &str)] = &[
    ("kon", "คน"),
    ("narak", "น่ารัก"),
    ("kraikinkaikai", "ใครกินไข่ไก่"),
    ("kunmaechop", "คุณแม่ชอบ"),
    ("anakot", "อนาคต"),
    ("kunmae", "คุณแม่"),
    ("lokpaiprasat", "โรคปลายประสาท"),
    ("popainai", "พ่อไปไหน"),
    ("wainee", "วันนี้"),
    ("mainaloei", "ไม่น่าเลย"),
    ("taksin", "ทักษิณ"),
    ("mankoimainaerok", "มันก็ไม่แน่หรอก"),
    // greetings
    ("sawatdee", "สวัสดี"),
    ("khopkhun", "ขอบคุณ"),
    // function words
    ("kan", "กัน"),
    ("tee", "ที่"),
    ("ja", "จะ"),
    ("pen", "เป็น"),
    ("hai", "ให้"),
    ("dai", "ได้"),
    ("mee", "มี"),
    ("tham", "ทำ"),
    ("hen", "เห็น"),
    ("pood", "พูด"),
    ("khao", "เขา"),
    ("rao", "เรา"),
    ("nee", "นี้"),
    ("nan", "นั้น"),
    ("yang", "ยัง"),
    ("laew", "แล้ว"),
    ("kap", "กับ"),
    ("duay", "ด้วย"),
    ("wa", "ว่า"),
    ("rue", "หรือ"),
    ("ko", "ก็"),
    ("tae", "แต่"),
    ("lae", "และ"),
    ("kong", "ของ"),
    ("chan", "ฉัน"),
    ("phom", "ผม"),
    ("khun", "คุณ"),
    ("ter", "เธอ"),
    ("man", "มัน"),
    // basic vocabulary
    ("chai", "ใช่"),
    ("mai", "ไม่"),
    ("rak", "รัก"),
    ("gin", "กิน"),
    ("kin", "กิน"),
    ("nam", "น้ำ"),
    ("kao", "ข้าว"),
    ("khao", "ข้าว"),
    ("ban", "บ้าน"),
    ("rot", "รถ"),
    ("pai", "ไป"),
    ("ma", "มา"),
    ("dee", "ดี"),
    ("suay", "สวย"),
    ("aroi", "อร่อย"),
    ("arai", "อะไร"),
    ("taorai", "เท่าไหร่"),
    ("yak", "อยาก"),
    ("deum", "ดื่ม"),
    ("norn", "นอน"),
    ("len", "เล่น"),
    ("rean", "เรียน"),
    ("tamngan", "ทำงาน"),
    // conversational
    ("wannee", "วันนี้"),
    ("penngaibang", "เป็นไงบ้าง"),
    ("pengaibang", "เป็นไงบ้าง"),
    ("penngai", "เป็นไง"),
    ("ngannakmai", "งานหนักไหม"),
    ("ngannak", "งานหนัก"),
    ("jor", "เจอ"),
    ("jur", "เจอ"),
    ("jer", "เจอ"),
    ("maha", "มาหา"),
    ("noydi", "หน่อยดิ"),
    ("noidi", "หน่อยดิ"),
    ("noi", "หน่อย"),
    ("di", "ดิ"),
    ("doo", "ดู"),
    ("du", "ดู"),
    ("meow", "เหมียว"),
    ("mew", "เหมียว"),
    ("maew", "แมว"),
    ("hong", "ห้อง"),
    ("hawng", "ห้อง"),
    ("pa", "ป่ะ"),
    ("paa", "ป่า"),
    ("bang", "บ้าง"),
    ("nak", "หนัก"),
    ("ngan", "งาน"),
    ("yak", "อยาก"),
    ("yakjor", "อยากเจอ"),
];

/// Thai text -> (category, expected romanizations)
pub static ROMANIZATION_OVERRIDES: phf::Map<&'static str, (Category, &'static [&'static str])> = phf_map! {
    // countries
    "อังกฤษ" => (Category::Country, &["angkrit", "angkrid", "england"]),
    "รัสเซีย" => (Category::Country, &["russia", "radsia", "rassia"]),
    "ญี่ปุ่น" => (Category::Country, &["japan", "yipun"]),
    "จีน" => (Category::Country, &["china", "jeen"]),
    "เกาหลี" => (Category::Country, &["korea", "kaoli"]),
    "อเมริกา" => (Category::Country, &["america"]),
    "อินเดีย" => (Category::Country, &["india"]),
    "เยอรมนี" => (Category::Country, &["germany", "yeramani"]),
    "ฝรั่งเศส" => (Category::Country, &["france", "farangset"]),
    "ไทย" => (Category::Country, &["thai"]),
    "เวียดนาม" => (Category::Country, &["vietnam"]),
    "ลาว" => (Category::Country, &["laos"]),
    "กัมพูชา" => (Category::Country, &["cambodia"]),
    "เมียนมาร์" => (Category::Country, &["myanmar"]),
    "สิงคโปร์" => (Category::Country, &["singapore"]),
    "มาเลเซีย" => (Category::Country, &["malaysia"]),
    // public figures
    "ทักษิณ" => (Category::Name, &["thaksin", "taksina"]),
    "ยิ่งลักษณ์" => (Category::Name, &["yinglak", "yingluck"]),
    "ประยุทธ์" => (Category::Name, &["prayut", "prayuth"]),
    "อภิสิทธิ์" => (Category::Name, &["abhisit"]),
    // provinces
    "เชียงใหม่" => (Category::Province, &["chiangmai", "chiang mai"]),
    "เชียงราย" => (Category::Province, &["chiangrai", "chiang rai"]),
    "กรุงเทพมหานคร" => (Category::Province, &["bangkok", "krungthep"]),
    "ภูเก็ต" => (Category::Province, &["phuket"]),
    // common given names
    "สมชาย" => (Category::Name, &["somchai"]),
    "สมศักดิ์" => (Category::Name, &["somsak"]),
    "ปราณี" => (Category::Name, &["pranee"]),
    "สุดา" => (Category::Name, &["suda"]),
    "วิชัย" => (Category::Name, &["wichai"]),
};

/// Base frequency of a category, ranking sources against each other.
pub fn base_frequency(category: Category) -> u64 {
    match category {
        Category::Known => KNOWN_FREQUENCY,
        Category::Country => 900_000,
        Category::Province => 800_000,
        Category::Name => 500_000,
        Category::Wiki => 100_000,
        Category::Word => 0,
    }
}

/// Entries for every curated mapping.
pub fn known_entries() -> Vec<CorpusEntry> {
    KNOWN_MAPPINGS
        .iter()
        .map(|&(rom, text)| CorpusEntry::new(text, rom, KNOWN_FREQUENCY, Category::Known))
        .collect()
}

/// Entries for every override spelling, ordered by Thai text.
pub fn override_entries() -> Vec<CorpusEntry> {
    let mut texts: Vec<&&str> = ROMANIZATION_OVERRIDES.keys().collect();
    texts.sort();
    let mut entries = Vec::new();
    for text in texts {
        if let Some((category, romanizations)) = ROMANIZATION_OVERRIDES.get(*text) {
            let frequency = base_frequency(*category) + OVERRIDE_BOOST;
            entries.extend(
                romanizations
                    .iter()
                    .map(|rom| CorpusEntry::new(*text, rom, frequency, *category)),
            );
        }
    }
    entries
}

/// Known mappings first, then overrides.
pub fn seed_entries() -> Vec<CorpusEntry> {
    let mut entries = known_entries();
    entries.extend(override_entries());
    entries
}

pub fn load_known<W: StoreWriter + ?Sized>(store: &mut W) -> Result<usize, StoreError> {
    let inserted = store.insert_entries(known_entries())?;
    tracing::debug!(inserted, "loaded known mappings");
    Ok(inserted)
}

pub fn load_overrides<W: StoreWriter + ?Sized>(store: &mut W) -> Result<usize, StoreError> {
    let inserted = store.insert_entries(override_entries())?;
    tracing::debug!(inserted, "loaded romanization overrides");
    Ok(inserted)
}

/// Load the whole seed corpus. Returns the number of entries inserted.
pub fn load_all<W: StoreWriter + ?Sized>(store: &mut W) -> Result<usize, StoreError> {
    Ok(load_known(store)? + load_overrides(store)?)
}
