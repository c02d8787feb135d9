use async_trait::async_trait;
use chrono::NaiveDateTime;
use tracing::info;
use vh_core::ports::{HandyServicePort, ServiceCall, ServiceResult};
use vh_core::wire::{BunningData, CollateData, SyougoData, SyukkaData};

use super::builders::{
    build_get_download_handy_execute_file, build_no_arg, build_sagyou_ymd_call,
    build_send_syougo_data, build_send_syukka_data, build_upload_binary_file,
};
use super::client::{SoapAsmxClient, SoapClientConfig};
use super::error::SoapError;
use super::parsers::Response;

pub const DEFAULT_ENDPOINT: &str =
    "https://scstestvanningreport.azurewebsites.net/WebSvc/SvcHandy.asmx";

/// `HandyServicePort` over SOAP: build, post, check for a fault, parse.
pub struct SoapHandyService {
    client: SoapAsmxClient,
}

impl SoapHandyService {
    pub fn new(client: SoapAsmxClient) -> Self {
        Self { client }
    }

    pub fn with_endpoint(endpoint: &str) -> Result<Self, SoapError> {
        Ok(Self::new(SoapAsmxClient::new(SoapClientConfig::new(endpoint))?))
    }

    async fn invoke(&self, call: ServiceCall, envelope: String) -> Result<Response, SoapError> {
        let raw = self.client.call(call.action(), envelope).await?;
        Response::parse(&raw)
    }

    async fn invoke_no_arg(&self, call: ServiceCall) -> Result<Response, SoapError> {
        self.invoke(call, build_no_arg(call.action())).await
    }
}

fn result_tag(call: ServiceCall) -> String {
    format!("{}Result", call.action())
}

#[async_trait]
impl HandyServicePort for SoapHandyService {
    async fn get_sys_date(&self) -> ServiceResult<Option<NaiveDateTime>> {
        let call = ServiceCall::GetSysDate;
        let res = self.invoke_no_arg(call).await?;
        Ok(res.datetime(&result_tag(call))?)
    }

    async fn get_sagyou_ymd(&self) -> ServiceResult<Option<NaiveDateTime>> {
        let call = ServiceCall::GetSagyouYmd;
        let res = self.invoke_no_arg(call).await?;
        Ok(res.datetime(&result_tag(call))?)
    }

    async fn get_update_ymd_hms(&self, sagyou_ymd: NaiveDateTime) -> ServiceResult<Option<NaiveDateTime>> {
        let call = ServiceCall::GetUpdateYmdHms;
        let res = self
            .invoke(call, build_sagyou_ymd_call(call.action(), sagyou_ymd))
            .await?;
        Ok(res.datetime(&result_tag(call))?)
    }

    async fn get_syukka_data(&self, sagyou_ymd: NaiveDateTime) -> ServiceResult<Option<SyukkaData>> {
        let call = ServiceCall::GetSyukkaData;
        let res = self
            .invoke(call, build_sagyou_ymd_call(call.action(), sagyou_ymd))
            .await?;
        Ok(res.syukka_data())
    }

    async fn send_syukka_data(&self, data: &BunningData) -> ServiceResult<bool> {
        let call = ServiceCall::SendSyukkaData;
        let res = self.invoke(call, build_send_syukka_data(data)).await?;
        let accepted = res.bool(&result_tag(call))?;
        info!(
            container_no = %data.container_no,
            bundles = data.bundles.len(),
            accepted,
            "SendSyukkaData answered"
        );
        Ok(accepted)
    }

    async fn upload_binary_file(&self, file_name: &str, buffer: &[u8]) -> ServiceResult<bool> {
        let call = ServiceCall::UploadBinaryFile;
        let res = self
            .invoke(call, build_upload_binary_file(file_name, buffer))
            .await?;
        let tag = result_tag(call);
        if !res.has(&tag) {
            return Ok(true);
        }
        Ok(res.bool(&tag)?)
    }

    async fn get_download_handy_execute_file_names(&self) -> ServiceResult<Vec<String>> {
        let call = ServiceCall::GetDownloadHandyExecuteFileNames;
        let res = self.invoke_no_arg(call).await?;
        Ok(res.strings(&result_tag(call)))
    }

    async fn get_download_handy_execute_file(&self, file_name: &str) -> ServiceResult<Vec<u8>> {
        let call = ServiceCall::GetDownloadHandyExecuteFile;
        let res = self
            .invoke(call, build_get_download_handy_execute_file(file_name))
            .await?;
        Ok(res.base64(&result_tag(call))?)
    }

    async fn get_syougo_data(&self) -> ServiceResult<Option<SyougoData>> {
        let res = self.invoke_no_arg(ServiceCall::GetSyougoData).await?;
        Ok(res.syougo_data())
    }

    async fn send_syougo_data(&self, data: &CollateData) -> ServiceResult<bool> {
        let call = ServiceCall::SendSyougoData;
        let res = self.invoke(call, build_send_syougo_data(data)).await?;
        Ok(res.bool(&result_tag(call))?)
    }
}
