// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 在临时目录中搭建数据目录布局，生成测试配置
// ==========================================

#![allow(dead_code)]

use despatch_shortfall::config::PipelineConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DEMAND_HEADER: &str = "Delivery,DlvTy,Ship-to,Material,Dlv.qty";
pub const DESPATCH_HEADER: &str = "Reference,Material,Quantity";
pub const STOCK_HEADER: &str = "Material,SLoc,Typ,StorageBin,Avail.st";

/// 临时数据目录（TempDir 需保持存活）
pub struct DataLayout {
    pub dir: TempDir,
    pub config: PipelineConfig,
}

impl DataLayout {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let mut config = PipelineConfig::default();
        config.paths.root_dir = dir.path().to_path_buf();

        for sub in [
            &config.paths.demand_dir,
            &config.paths.despatch_dir,
            &config.paths.stock_dir,
        ] {
            fs::create_dir_all(dir.path().join(sub)).expect("创建数据目录失败");
        }

        Self { dir, config }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn output(&self, name: &str) -> PathBuf {
        self.config.paths.output_dir().join(name)
    }

    pub fn write_demand(&self, rows: &[&str]) {
        write_table(&self.config.paths.demand_dir().join("demand.csv"), DEMAND_HEADER, rows);
    }

    pub fn write_despatch(&self, rows: &[&str]) {
        write_table(
            &self.config.paths.despatch_dir().join("despatch.csv"),
            DESPATCH_HEADER,
            rows,
        );
    }

    pub fn write_stock(&self, rows: &[&str]) {
        write_table(&self.config.paths.stock_dir().join("lx03.csv"), STOCK_HEADER, rows);
    }

    pub fn write_exclusions(&self, ids: &[&str]) {
        fs::write(self.config.paths.exclusions_file(), lines(ids)).expect("写排除清单失败");
    }

    pub fn write_recipients(&self, addresses: &[&str]) {
        fs::write(self.config.paths.recipients_file(), lines(addresses)).expect("写收件人清单失败");
    }

    pub fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.output(name)).expect("读取输出文件失败")
    }
}

fn write_table(path: &Path, header: &str, rows: &[&str]) {
    let mut content = String::from(header);
    content.push('\n');
    content.push_str(&lines(rows));
    fs::write(path, content).expect("写输入表失败");
}

fn lines(rows: &[&str]) -> String {
    rows.iter().map(|r| format!("{}\n", r)).collect()
}
