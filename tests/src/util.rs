use std::collections::HashMap;
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use image::{Rgb, RgbImage};
use palmist_common::config::Config;
use palmist_common::image::PalmImage;
use palmist_common::user::UserData;
use serde_json::{Value, json};
use warp::Filter;
use warp::http::StatusCode;

/// A request the stub server received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: &'static str,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: u16,
    pub body: Value,
}

impl StubReply {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: json!({ "error": { "message": "stubbed failure" } }),
        }
    }
}

pub struct StubServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    /// Serves `POST /vision` and `POST /chat` on an ephemeral local port.
    pub fn start(vision: StubReply, chat: StubReply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        let vision_route = warp::post()
            .and(warp::path("vision"))
            .and(warp::query::<HashMap<String, String>>())
            .and(warp::body::json::<Value>())
            .map(move |query, body| {
                log.lock().unwrap().push(Recorded {
                    path: "vision",
                    query,
                    authorization: None,
                    body,
                });
                reply(&vision)
            });

        let log = Arc::clone(&requests);
        let chat_route = warp::post()
            .and(warp::path("chat"))
            .and(warp::header::optional::<String>("authorization"))
            .and(warp::body::json::<Value>())
            .map(move |authorization, body| {
                log.lock().unwrap().push(Recorded {
                    path: "chat",
                    query: HashMap::new(),
                    authorization,
                    body,
                });
                reply(&chat)
            });

        let (addr, server) = warp::serve(vision_route.or(chat_route)).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        Self { addr, requests }
    }

    pub fn requests(&self, path: &str) -> Vec<Recorded> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.path == path)
            .cloned()
            .collect()
    }

    /// A config pointing both providers at this server with the given keys.
    pub fn config(&self, vision_key: Option<&str>, openai_key: Option<&str>) -> Config {
        let mut config = quiet_config();
        config.endpoints.vision = format!("http://{}/vision", self.addr);
        config.endpoints.chat = format!("http://{}/chat", self.addr);
        config.endpoints.timeout_secs = 5;
        config.api_keys.google_vision = vision_key.map(str::to_string);
        config.api_keys.openai = openai_key.map(str::to_string);
        config
    }
}

fn reply(stub: &StubReply) -> warp::reply::WithStatus<warp::reply::Json> {
    let status = StatusCode::from_u16(stub.status).unwrap();
    warp::reply::with_status(warp::reply::json(&stub.body), status)
}

/// Defaults with no keys, no stage delay and no cache.
pub fn quiet_config() -> Config {
    let mut config = Config::default();
    config.ai.analysis.stage_delay_ms = 0;
    config.ai.analysis.enable_cache = false;
    config
}

pub fn chat_reply(content: &str) -> Value {
    json!({
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

pub fn vision_reply(labels: &[(&str, f64)]) -> Value {
    let labels: Vec<Value> = labels
        .iter()
        .map(|(description, score)| json!({ "description": description, "score": score }))
        .collect();
    json!({
        "responses": [
            {
                "labelAnnotations": labels,
                "textAnnotations": [ { "description": "LINES", "score": 0.0 } ],
                "faceAnnotations": []
            }
        ]
    })
}

/*************************************************************
                          Fixtures
**************************************************************/

pub fn user() -> UserData {
    UserData::default()
        .with_name("Yara")
        .with_birth_date(NaiveDate::from_ymd_opt(1995, 7, 14).unwrap())
        .with_location("Cairo")
}

/// A flat skin-toned PNG.
pub fn png(width: u32, height: u32) -> PalmImage {
    let mut bytes = Vec::new();
    RgbImage::from_pixel(width, height, Rgb([214, 170, 150]))
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    PalmImage::from_bytes(bytes)
}

/// Every object key path in `value`, with array items collapsed to `[]`.
pub fn key_paths(value: &Value) -> Vec<String> {
    fn walk(value: &Value, prefix: &str, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = format!("{prefix}.{key}");
                    out.push(path.clone());
                    walk(child, &path, out);
                }
            }
            Value::Array(items) => {
                for item in items {
                    walk(item, &format!("{prefix}[]"), out);
                }
            }
            _ => {}
        }
    }
    let mut out = Vec::new();
    walk(value, "", &mut out);
    out.sort();
    out.dedup();
    out
}

pub const SECTIONED_REPLY: &str = "\
قراءة كفك اليوم:

1. الحب والعلاقات
قلب دافئ ينتظر من يفهمه.
2. العمل والوظيفة
طموحك يفتح لك أبواباً جديدة.
3. الصحة والحيوية
طاقتك ثابتة مع الراحة الكافية.
4. المال والثروة
إدارة حكيمة تجلب الاستقرار.
5. الشخصية والسلوك
هادئ ومتأمل وصادق.
6. المستقبل والتوقعات
سنة مليئة بالفرص.
";
