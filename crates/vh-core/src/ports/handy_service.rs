use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::wire::{BunningData, CollateData, SyougoData, SyukkaData};

/// Web service operations of the handy back office (SvcHandy.asmx).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCall {
    GetSysDate,
    GetSagyouYmd,
    GetUpdateYmdHms,
    GetSyukkaData,
    SendSyukkaData,
    UploadBinaryFile,
    GetDownloadHandyExecuteFileNames,
    GetDownloadHandyExecuteFile,
    GetSyougoData,
    SendSyougoData,
}

impl ServiceCall {
    /// SOAP action name.
    pub fn action(self) -> &'static str {
        match self {
            ServiceCall::GetSysDate => "GetSysDate",
            ServiceCall::GetSagyouYmd => "GetSagyouYmd",
            ServiceCall::GetUpdateYmdHms => "GetUpdateYmdHms",
            ServiceCall::GetSyukkaData => "GetSyukkaData",
            ServiceCall::SendSyukkaData => "SendSyukkaData",
            ServiceCall::UploadBinaryFile => "UploadBinaryFile",
            ServiceCall::GetDownloadHandyExecuteFileNames => "GetDownloadHandyExecuteFileNames",
            ServiceCall::GetDownloadHandyExecuteFile => "GetDownloadHandyExecuteFile",
            ServiceCall::GetSyougoData => "GetSyougoData",
            ServiceCall::SendSyougoData => "SendSyougoData",
        }
    }

    /// Operator message once every attempt has failed.
    pub fn failure_message(self) -> &'static str {
        match self {
            ServiceCall::GetSysDate => "サーバー日時の取得に失敗しました",
            ServiceCall::GetSagyouYmd => "作業日の取得に失敗しました",
            ServiceCall::GetUpdateYmdHms => "出荷データ更新日時の取得に失敗しました",
            ServiceCall::GetSyukkaData => "出荷データの取得に失敗しました",
            ServiceCall::SendSyukkaData => "出荷データの更新に失敗しました",
            ServiceCall::UploadBinaryFile => "ファイルのアップロードに失敗しました",
            ServiceCall::GetDownloadHandyExecuteFileNames => "更新対象ファイルの取得に失敗しました",
            ServiceCall::GetDownloadHandyExecuteFile => "ファイルのダウンロードに失敗しました",
            ServiceCall::GetSyougoData => "照合データの取得に失敗しました",
            ServiceCall::SendSyougoData => "照合データの更新に失敗しました",
        }
    }
}

#[derive(Debug, Error)]
pub enum HandyServiceError {
    /// Connection, timeout or body read failure.
    #[error("{0}")]
    Transport(String),

    #[error("HTTP {status} {reason}\n{body}")]
    Http {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("{message}")]
    Fault { message: String, raw: String },

    #[error("{0}")]
    Parse(String),

    #[error("{message}")]
    Exhausted {
        message: String,
        #[source]
        source: Box<HandyServiceError>,
    },
}

impl HandyServiceError {
    /// Short kind name recorded in the communication history.
    pub fn kind(&self) -> &'static str {
        match self {
            HandyServiceError::Transport(_) => "Transport",
            HandyServiceError::Http { .. } => "Http",
            HandyServiceError::Fault { .. } => "SoapFault",
            HandyServiceError::Parse(_) => "Parse",
            HandyServiceError::Exhausted { .. } => "Exhausted",
        }
    }

    /// The innermost failure behind retries.
    pub fn root(&self) -> &HandyServiceError {
        match self {
            HandyServiceError::Exhausted { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type ServiceResult<T> = Result<T, HandyServiceError>;

#[async_trait]
pub trait HandyServicePort: Send + Sync {
    async fn get_sys_date(&self) -> ServiceResult<Option<NaiveDateTime>>;

    async fn get_sagyou_ymd(&self) -> ServiceResult<Option<NaiveDateTime>>;

    async fn get_update_ymd_hms(&self, sagyou_ymd: NaiveDateTime) -> ServiceResult<Option<NaiveDateTime>>;

    /// `None` when the response carries no result element.
    async fn get_syukka_data(&self, sagyou_ymd: NaiveDateTime) -> ServiceResult<Option<SyukkaData>>;

    async fn send_syukka_data(&self, data: &BunningData) -> ServiceResult<bool>;

    async fn upload_binary_file(&self, file_name: &str, buffer: &[u8]) -> ServiceResult<bool>;

    async fn get_download_handy_execute_file_names(&self) -> ServiceResult<Vec<String>>;

    async fn get_download_handy_execute_file(&self, file_name: &str) -> ServiceResult<Vec<u8>>;

    async fn get_syougo_data(&self) -> ServiceResult<Option<SyougoData>>;

    async fn send_syougo_data(&self, data: &CollateData) -> ServiceResult<bool>;
}
