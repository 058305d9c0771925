use std::collections::HashMap;
use uuid::Uuid;

/// 日历上按人区分的背景色，顺序不能改动，否则所有人的颜色都会变
pub const PALETTE: [&str; 20] = [
    "blue", "emerald", "amber", "rose", "indigo", "cyan", "teal", "lime", "orange", "fuchsia",
    "violet", "sky", "pink", "red", "green", "yellow", "stone", "slate", "neutral", "zinc",
];

/// 名字缺失时的占位（合成条目）
pub const PLACEHOLDER_NAME: &str = "Usuario";
/// 名字查询失败时的占位（已存储的申请）
pub const UNKNOWN_NAME: &str = "Unknown";

const HASH_MODULUS: u64 = 2_147_483_647;

/// `h = (h * 31 + c) mod (2^31 - 1)`，按 UTF-16 码元计算，与前端保持一致
pub fn hash_owner_id(value: &str) -> u64 {
    value
        .encode_utf16()
        .fold(0u64, |hash, unit| (hash * 31 + u64::from(unit)) % HASH_MODULUS)
}

/// 同一 owner 永远落在同一个色槽；不需要存储分配结果
pub fn color_slot(owner_id: &Uuid) -> usize {
    (hash_owner_id(&owner_id.to_string()) % PALETTE.len() as u64) as usize
}

pub fn color_name(slot: usize) -> &'static str {
    PALETTE[slot % PALETTE.len()]
}

pub fn first_name(full_name: &str) -> Option<&str> {
    full_name.split_whitespace().next()
}

/// 同名消歧：对当前渲染的条目统计名（first name）出现的次数，
/// 出现不止一次的名显示全名，否则只显示名。按条目计数，同一个人的两条记录也算两次。
#[derive(Debug, Default)]
pub struct DisplayNames {
    first_name_counts: HashMap<String, usize>,
}

impl DisplayNames {
    pub fn from_entries<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut first_name_counts: HashMap<String, usize> = HashMap::new();
        for name in names {
            let first = first_name(name).unwrap_or(PLACEHOLDER_NAME);
            *first_name_counts.entry(first.to_string()).or_default() += 1;
        }
        Self { first_name_counts }
    }

    pub fn is_ambiguous(&self, first: &str) -> bool {
        self.first_name_counts
            .get(first)
            .is_some_and(|count| *count > 1)
    }

    pub fn display_name(&self, full_name: &str) -> String {
        match first_name(full_name) {
            None => PLACEHOLDER_NAME.to_string(),
            Some(first) if self.is_ambiguous(first) => full_name.trim().to_string(),
            Some(first) => first.to_string(),
        }
    }
}
