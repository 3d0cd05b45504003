// ==========================================
// 批次发货缺口分析 - 领域类型定义
// ==========================================
// 职责: 库区枚举、库位类型映射表、合并状态
// 红线: 库位类型 → 库区映射为封闭表,未映射类型一律丢弃
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 合并状态 (Match State)
// ==========================================
// 排序口径: left_only 在前, both 在后
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    LeftOnly, // 左表独有（无对应发货/无库存）
    Both,     // 双边匹配
}

impl MatchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchState::LeftOnly => "left_only",
            MatchState::Both => "both",
        }
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left_only" => Ok(MatchState::LeftOnly),
            "both" => Ok(MatchState::Both),
            other => Err(format!("未知合并状态: {}", other)),
        }
    }
}

// ==========================================
// 库区 (Storage Area)
// ==========================================
// 声明顺序即分配优先级（Ord 派生依赖此顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StorageArea {
    #[serde(rename = "916")]
    Area916,
    #[serde(rename = "OPD")]
    Opd,
    #[serde(rename = "Open_tote")]
    OpenTote,
    #[serde(rename = "Chute-end")]
    ChuteEnd,
    Mezz,
    #[serde(rename = "MPR")]
    Mpr,
    #[serde(rename = "PBS")]
    Pbs,
    #[serde(rename = "FM")]
    Fm,
    #[serde(rename = "FP")]
    Fp,
    Putaway,
    Inbound,
    #[serde(rename = "999")]
    Area999,
    #[serde(rename = "923")]
    Area923,
    #[serde(rename = "HP")]
    Hp,
    NoStock, // 哨兵库区: 无库存覆盖的剩余缺口
}

impl StorageArea {
    /// 固定分配优先级
    pub const PRIORITY: [StorageArea; 15] = [
        StorageArea::Area916,
        StorageArea::Opd,
        StorageArea::OpenTote,
        StorageArea::ChuteEnd,
        StorageArea::Mezz,
        StorageArea::Mpr,
        StorageArea::Pbs,
        StorageArea::Fm,
        StorageArea::Fp,
        StorageArea::Putaway,
        StorageArea::Inbound,
        StorageArea::Area999,
        StorageArea::Area923,
        StorageArea::Hp,
        StorageArea::NoStock,
    ];

    /// 库区标签（报表输出口径）
    pub fn label(&self) -> &'static str {
        match self {
            StorageArea::Area916 => "916",
            StorageArea::Opd => "OPD",
            StorageArea::OpenTote => "Open_tote",
            StorageArea::ChuteEnd => "Chute-end",
            StorageArea::Mezz => "Mezz",
            StorageArea::Mpr => "MPR",
            StorageArea::Pbs => "PBS",
            StorageArea::Fm => "FM",
            StorageArea::Fp => "FP",
            StorageArea::Putaway => "Putaway",
            StorageArea::Inbound => "Inbound",
            StorageArea::Area999 => "999",
            StorageArea::Area923 => "923",
            StorageArea::Hp => "HP",
            StorageArea::NoStock => "NoStock",
        }
    }

    /// 原始库位类型代码 → 库区
    ///
    /// # 返回
    /// - Some(StorageArea): 映射表内的代码
    /// - None: 未映射代码（调用方须丢弃该行）
    ///
    /// HP / NoStock 仅存在于优先级序列中,没有任何原始代码映射到它们
    pub fn from_storage_type(code: &str) -> Option<StorageArea> {
        let code = code.trim().to_uppercase();
        match code.as_str() {
            "916" => Some(StorageArea::Area916),
            "OPD" => Some(StorageArea::Opd),
            "201" | "202" | "203" | "204" | "205" | "206" | "207" | "208" | "209" | "210"
            | "211" | "212" | "213" | "214" | "215" | "216" | "217" | "218" | "219" | "220"
            | "221" | "222" | "223" | "224" | "225" | "226" | "227" | "228" => {
                Some(StorageArea::OpenTote)
            }
            "1" => Some(StorageArea::ChuteEnd),
            "MS" | "MSX" | "MIX" | "MP" => Some(StorageArea::Mezz),
            "MPR" => Some(StorageArea::Mpr),
            "PB1" | "PB2" | "PB3" | "PB4" => Some(StorageArea::Pbs),
            "FM" => Some(StorageArea::Fm),
            "FP" => Some(StorageArea::Fp),
            "P&D" | "BPD" => Some(StorageArea::Putaway),
            "600" | "601" | "603" | "604" | "609" => Some(StorageArea::Inbound),
            "999" => Some(StorageArea::Area999),
            "923" => Some(StorageArea::Area923),
            _ => None,
        }
    }
}

impl fmt::Display for StorageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for StorageArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        StorageArea::PRIORITY
            .iter()
            .copied()
            .find(|area| area.label() == label)
            .ok_or_else(|| format!("未知库区标签: {}", label))
    }
}
