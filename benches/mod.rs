use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    pubnub::bench_publish_request,
    pubnub::bench_parse_subscribe_response,
    pubnub::bench_publish_exchange,
    pubnub::bench_subscribe_exchange
);
criterion_main!(benches);
