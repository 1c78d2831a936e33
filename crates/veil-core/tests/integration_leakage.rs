//! Validation errors must never echo the value being masked.

use serde_json::json;
use veil_core::{MaskOptions, Masker, NonTextPolicy};

const SECRET: &str = "sk_live_4f9aZQ8yP2mX7";

fn failing_options() -> Vec<MaskOptions> {
    vec![
        MaskOptions::builder().max_length(5).build(),
        MaskOptions::builder().mask_char("").build(),
        MaskOptions::builder().mask_char("sk_live_4f9").build(),
        MaskOptions::builder().percentage(150.0).build(),
        MaskOptions::builder().preserve_pattern("(sk_live").build(),
        MaskOptions::builder().strict(true).prefix_length(40).build(),
        MaskOptions::builder().strict(true).suffix_length(40).prefix_length(0).build(),
        MaskOptions::builder().strict(true).prefix_length(12).suffix_length(12).build(),
    ]
}

#[test]
fn test_errors_do_not_contain_input() {
    let masker = Masker::new();
    for options in failing_options() {
        let err = masker
            .obscure(SECRET, &options)
            .expect_err("options should fail validation");
        let message = err.to_string();
        assert!(!message.contains(SECRET), "leaked in {message}");
        assert!(!format!("{err:?}").contains(SECRET));
    }
}

#[test]
fn test_type_errors_do_not_contain_input() {
    let masker = Masker::new();
    let options = MaskOptions::builder().non_text(NonTextPolicy::Reject).build();
    let err = masker.obscure(4_111_111_111_111_111u64, &options).unwrap_err();
    assert!(!err.to_string().contains("4111111111111111"));
}

#[test]
fn test_option_bag_errors_do_not_contain_input() {
    let bags = [
        json!({ "prefixLength": -1 }),
        json!({ "maskChar": 3 }),
        json!({ "fullMask": "yes" }),
        json!({ "percentage": "fifty" }),
    ];
    for bag in bags {
        let err = MaskOptions::from_json(&bag).unwrap_err();
        assert!(!err.to_string().contains(SECRET));
    }
}

#[tokio::test]
async fn test_async_errors_do_not_contain_input() {
    let masker = Masker::new();
    let options = MaskOptions::builder().max_length(3).build();
    let err = masker.obscure_async(SECRET, &options).await.unwrap_err();
    assert!(!err.to_string().contains(SECRET));
}
