use chrono::NaiveDate;
use mockito::{Matcher, Server};
use vh_core::ports::{HandyServiceError, HandyServicePort};
use vh_core::wire::{CollateData, CollateDtl};
use vh_infra::soap::SoapHandyService;

fn envelope(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
         <soap:Body>{body}</soap:Body></soap:Envelope>"
    )
}

fn service(server: &Server) -> SoapHandyService {
    SoapHandyService::with_endpoint(&format!("{}/WebSvc/SvcHandy.asmx", server.url())).unwrap()
}

#[tokio::test]
async fn work_date_is_read_with_the_soap_action_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/WebSvc/SvcHandy.asmx")
        .match_header("SOAPAction", "\"http://tempuri.org/GetSagyouYmd\"")
        .match_header("content-type", "text/xml; charset=utf-8")
        .match_body(Matcher::Regex("<GetSagyouYmd xmlns=\"http://tempuri.org/\" />".into()))
        .with_status(200)
        .with_body(envelope(
            "<GetSagyouYmdResponse xmlns=\"http://tempuri.org/\">\
             <GetSagyouYmdResult>2025-03-21T00:00:00</GetSagyouYmdResult>\
             </GetSagyouYmdResponse>",
        ))
        .create_async()
        .await;

    let day = service(&server).get_sagyou_ymd().await.unwrap();
    assert_eq!(
        day,
        NaiveDate::from_ymd_opt(2025, 3, 21).unwrap().and_hms_opt(0, 0, 0)
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn http_error_keeps_status_and_payload() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/WebSvc/SvcHandy.asmx")
        .with_status(500)
        .with_body("down")
        .create_async()
        .await;

    let err = service(&server).get_sys_date().await.unwrap_err();
    match err {
        HandyServiceError::Http { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn soap_fault_is_reported_with_its_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/WebSvc/SvcHandy.asmx")
        .with_status(200)
        .with_body(envelope(
            "<soap:Fault><faultcode>soap:Server</faultcode>\
             <faultstring>Server was unable to process request.</faultstring></soap:Fault>",
        ))
        .create_async()
        .await;

    let err = service(&server).get_syougo_data().await.unwrap_err();
    assert_eq!(err.kind(), "SoapFault");
    assert_eq!(err.to_string(), "Server was unable to process request.");
}

#[tokio::test]
async fn collation_result_is_posted_and_acknowledged() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/WebSvc/SvcHandy.asmx")
        .match_header("SOAPAction", "\"http://tempuri.org/SendSyougoData\"")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("<containerID>C-1</containerID>".into()),
            Matcher::Regex("<collateDtlsyougoKakunin>true</collateDtlsyougoKakunin>".into()),
        ]))
        .with_status(200)
        .with_body(envelope(
            "<SendSyougoDataResponse xmlns=\"http://tempuri.org/\">\
             <SendSyougoDataResult>true</SendSyougoDataResult></SendSyougoDataResponse>",
        ))
        .create_async()
        .await;

    let data = CollateData {
        container_id: "C-1".into(),
        syogo_kanryo: true,
        details: vec![CollateDtl {
            heat_no: "H1".into(),
            sokuban: "001".into(),
            syougo_kakunin: true,
        }],
    };
    assert!(service(&server).send_syougo_data(&data).await.unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn upload_without_result_tag_counts_as_success() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/WebSvc/SvcHandy.asmx")
        .match_header("SOAPAction", "\"http://tempuri.org/UploadBinaryFile\"")
        .with_status(200)
        .with_body(envelope("<UploadBinaryFileResponse xmlns=\"http://tempuri.org/\" />"))
        .create_async()
        .await;

    assert!(service(&server).upload_binary_file("log.txt", b"abc").await.unwrap());
}

#[tokio::test]
async fn file_names_are_listed() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/WebSvc/SvcHandy.asmx")
        .with_status(200)
        .with_body(envelope(
            "<GetDownloadHandyExecuteFileNamesResponse xmlns=\"http://tempuri.org/\">\
             <GetDownloadHandyExecuteFileNamesResult><string>app.apk</string></GetDownloadHandyExecuteFileNamesResult>\
             </GetDownloadHandyExecuteFileNamesResponse>",
        ))
        .create_async()
        .await;

    let names = service(&server)
        .get_download_handy_execute_file_names()
        .await
        .unwrap();
    assert_eq!(names, ["app.apk"]);
}
