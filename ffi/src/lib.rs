use anyhow::{anyhow, Context};
use dh_engine::{api, Adversary, ConvertOptions, Monster};
use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use serde::Deserialize;
use serde_json::{json, Value};

pub const VERSION: &str = concat!("dh-ffi ", env!("CARGO_PKG_VERSION"));

/// Either an inline monster or a built-in id, plus options.
#[derive(Deserialize)]
struct ConvertInput {
    #[serde(default)]
    monster: Option<Monster>,
    #[serde(default)]
    monster_id: Option<String>,
    #[serde(default)]
    options: ConvertOptions,
}

#[derive(Deserialize)]
struct RescaleInput {
    adversary: Adversary,
    tier: u8,
}

#[derive(Deserialize)]
struct AdjustInput {
    adversary: Adversary,
    preset: String,
}

fn envelope(result: anyhow::Result<Value>) -> String {
    let payload = match result {
        Ok(value) => json!({ "ok": true, "result": value }),
        Err(e) => json!({ "ok": false, "error": format!("{:#}", e) }),
    };
    payload.to_string()
}

fn parse<T: serde::de::DeserializeOwned>(input: &str) -> anyhow::Result<T> {
    serde_json::from_str(input).context("invalid_config")
}

fn to_value(adversary: &Adversary) -> anyhow::Result<Value> {
    serde_json::to_value(adversary).context("failed to serialize adversary")
}

fn convert_monster(input: &str) -> anyhow::Result<Value> {
    let req: ConvertInput = parse(input)?;
    let monster = match (req.monster, req.monster_id) {
        (Some(m), _) => m,
        (None, Some(id)) => api::builtin_monster(&id)?,
        (None, None) => return Err(anyhow!("either monster or monster_id must be provided")),
    };
    to_value(&api::convert_monster(&monster, &req.options)?)
}

fn rescale_tier(input: &str) -> anyhow::Result<Value> {
    let req: RescaleInput = parse(input)?;
    to_value(&api::rescale_tier(&req.adversary, req.tier)?)
}

fn quick_adjust(input: &str) -> anyhow::Result<Value> {
    let req: AdjustInput = parse(input)?;
    to_value(&api::quick_adjust(&req.adversary, &req.preset)?)
}

// Internal functions for testing without JNI overhead
pub fn convert_monster_internal(input: &str) -> String {
    envelope(convert_monster(input))
}

pub fn rescale_tier_internal(input: &str) -> String {
    envelope(rescale_tier(input))
}

pub fn quick_adjust_internal(input: &str) -> String {
    envelope(quick_adjust(input))
}

fn to_jstring(env: &JNIEnv, s: String) -> jstring {
    env.new_string(s)
        .map(|j| j.into_raw())
        .unwrap_or(std::ptr::null_mut())
}

fn respond(env: &mut JNIEnv, json: &JString, handler: fn(&str) -> String) -> jstring {
    let input: String = match env.get_string(json) {
        Ok(s) => s.into(),
        Err(e) => return to_jstring(env, envelope(Err(anyhow!("invalid_input: {}", e)))),
    };
    to_jstring(env, handler(&input))
}

#[no_mangle]
pub extern "system" fn Java_com_dhconvert_Ffi_version(env: JNIEnv, _class: JClass) -> jstring {
    to_jstring(&env, VERSION.to_string())
}

#[no_mangle]
pub extern "system" fn Java_com_dhconvert_Ffi_convertMonsterJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    respond(&mut env, &json, convert_monster_internal)
}

#[no_mangle]
pub extern "system" fn Java_com_dhconvert_Ffi_rescaleTierJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    respond(&mut env, &json, rescale_tier_internal)
}

#[no_mangle]
pub extern "system" fn Java_com_dhconvert_Ffi_quickAdjustJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    respond(&mut env, &json, quick_adjust_internal)
}
