use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 流水线配置（持久化对象）
///
/// 存储位置：JSON 配置文件（可选），缺省字段取默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 数据目录布局
    pub paths: DataPaths,

    /// 输入文件格式
    pub input: InputFormat,

    /// 需要出报表的交货类型（每个类型一份缺口汇总）
    pub delivery_types: Vec<String>,

    /// 发货数量符号约定
    pub despatch_sign: DespatchSign,

    /// 分配前剔除的库位类型
    pub removed_storage_types: Vec<String>,

    /// 按交货类型剔除的库位（StorageBin）
    pub bin_exclusions: BTreeMap<String, BinExclusion>,

    /// 邮件参数
    pub mail: MailSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let mut bin_exclusions = BTreeMap::new();
        bin_exclusions.insert(
            "ZLFA".to_string(),
            BinExclusion {
                bins: (1..=24).map(|n| n.to_string()).collect(),
                prefixes: vec!["CELL".to_string()],
            },
        );
        bin_exclusions.insert(
            "ZLFS".to_string(),
            BinExclusion {
                bins: vec!["INBOUND".to_string(), "50".to_string()],
                prefixes: Vec::new(),
            },
        );

        Self {
            paths: DataPaths::default(),
            input: InputFormat::default(),
            delivery_types: vec!["ZLFA".to_string(), "ZLFS".to_string()],
            despatch_sign: DespatchSign::AsRecorded,
            removed_storage_types: ["TIN", "TCR", "TIO", "MPB"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            bin_exclusions,
            mail: MailSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// 某交货类型的库位剔除规则（未配置则不剔除）
    pub fn bin_exclusion_for(&self, delivery_type: &str) -> BinExclusion {
        self.bin_exclusions
            .get(delivery_type)
            .cloned()
            .unwrap_or_default()
    }
}

/// 数据目录布局（相对路径基于 root_dir）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub root_dir: PathBuf,
    pub demand_dir: PathBuf,
    pub despatch_dir: PathBuf,
    pub stock_dir: PathBuf,
    pub exclusions_file: PathBuf,
    pub recipients_file: PathBuf,
    pub output_dir: PathBuf,
    pub outbox_dir: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            demand_dir: PathBuf::from("Data/Demand"),
            despatch_dir: PathBuf::from("Data/Despatch"),
            stock_dir: PathBuf::from("Data/Stock_LX03"),
            exclusions_file: PathBuf::from("Data/exclusions.csv"),
            recipients_file: PathBuf::from("Data/email_list.csv"),
            output_dir: PathBuf::from("Output"),
            outbox_dir: PathBuf::from("Output/outbox"),
        }
    }
}

impl DataPaths {
    /// 以 root_dir 解析相对路径
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir.join(path)
        }
    }

    pub fn demand_dir(&self) -> PathBuf {
        self.resolve(&self.demand_dir)
    }

    pub fn despatch_dir(&self) -> PathBuf {
        self.resolve(&self.despatch_dir)
    }

    pub fn stock_dir(&self) -> PathBuf {
        self.resolve(&self.stock_dir)
    }

    pub fn exclusions_file(&self) -> PathBuf {
        self.resolve(&self.exclusions_file)
    }

    pub fn recipients_file(&self) -> PathBuf {
        self.resolve(&self.recipients_file)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    pub fn outbox_dir(&self) -> PathBuf {
        self.resolve(&self.outbox_dir)
    }
}

/// 分隔文本输入格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFormat {
    /// 字段分隔符（.tsv 文件始终按制表符解析）
    pub delimiter: char,

    /// 表头前需跳过的行数
    pub preamble_lines: usize,
}

impl Default for InputFormat {
    fn default() -> Self {
        Self {
            delimiter: ',',
            preamble_lines: 0,
        }
    }
}

/// 发货数量符号约定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DespatchSign {
    /// 文件中已是负数（按原值累加）
    AsRecorded,
    /// 文件中为正数（读入时取反）
    Negate,
}

impl DespatchSign {
    pub fn apply(&self, qty: i64) -> i64 {
        match self {
            DespatchSign::AsRecorded => qty,
            DespatchSign::Negate => -qty,
        }
    }
}

/// 库位剔除规则：精确库位 + 库位前缀（均忽略大小写）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinExclusion {
    pub bins: Vec<String>,
    pub prefixes: Vec<String>,
}

impl BinExclusion {
    pub fn excludes(&self, bin: &str) -> bool {
        let bin = bin.trim().to_uppercase();
        self.bins.iter().any(|b| b.trim().to_uppercase() == bin)
            || self
                .prefixes
                .iter()
                .any(|p| bin.starts_with(&p.trim().to_uppercase()))
    }
}

/// 邮件参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    pub sender: String,
    pub subject_prefix: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            sender: "reports@localhost".to_string(),
            subject_prefix: "Batch Delivery Failures for".to_string(),
        }
    }
}
