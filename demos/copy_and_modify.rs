use gosub_net::{Body, BodyConfig, HttpResponse, NetError};

fn main() -> Result<(), NetError> {
    env_logger::init();

    // The transport side builds the response once
    let response = HttpResponse::builder()
        .status_code(200)
        .reason_phrase("OK")
        .content_type("application/json")
        .total_size(15)
        .add_header("X-Parse-Request-Id", "req-1")
        .body(Body::from_bytes(r#"{"result":"ok"}"#))
        .build();

    // Derive a copy with a different status. The original is unchanged and
    // both still point at the same body stream.
    let degraded = response
        .new_builder()
        .status_code(503)
        .reason_phrase("Service Unavailable")
        .add_header("Retry-After", "5")
        .build();

    println!("original: {} {:?}", response.status_code(), response.reason_phrase());
    println!("copy:     {} {:?}", degraded.status_code(), degraded.reason_phrase());

    let cfg = BodyConfig::builder().max_body_bytes(1024).build().expect("valid body config");
    if let Some(body) = degraded.content() {
        let bytes = body.read_to_end(&cfg)?;
        println!("body: {}", String::from_utf8_lossy(&bytes));
    }

    // The stream was consumed through the copy
    match response.content().map(|b| b.read_to_end(&cfg)) {
        Some(Err(NetError::BodyConsumed)) => println!("original body already consumed"),
        other => println!("unexpected: {other:?}"),
    }

    Ok(())
}
