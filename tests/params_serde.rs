#![cfg(feature = "serde")]

use bloomfilters::{optimal_params, FilterParams};

#[test]
fn test_params_round_trip() {
    let params = optimal_params(1000, 0.01).unwrap();

    let got = serde_json::to_string(&params).expect("must serialise");
    assert_eq!(got, r#"{"bits":9536,"hash_count":7}"#);

    let round_trip: FilterParams = serde_json::from_str(&got).expect("must deserialise");
    assert_eq!(params, round_trip);
}
