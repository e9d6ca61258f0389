use integration::helpers::SET_FEE_SIGNATURE;

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{keccak256, U256},
};
use helpers::{decode_function_output, encode_function_call};

#[test]
fn call_data_is_selector_plus_padded_argument() {
    let call_data =
        encode_function_call(SET_FEE_SIGNATURE, &[DynSolValue::Uint(U256::from(500), 256)])
            .unwrap();

    // 4-byte selector over the canonical signature, then 500 left-padded to 32 bytes
    assert_eq!(call_data.len(), 36);
    assert_eq!(&call_data[..4], &keccak256("setFeePercentage(uint256)")[..4]);

    let mut expected_argument = [0u8; 32];
    expected_argument[30] = 0x01;
    expected_argument[31] = 0xf4;
    assert_eq!(&call_data[4..], &expected_argument);
}

#[test]
fn encoding_is_deterministic() {
    let args = [DynSolValue::Uint(U256::from(500), 256)];
    let first = encode_function_call(SET_FEE_SIGNATURE, &args).unwrap();
    let second = encode_function_call(SET_FEE_SIGNATURE, &args).unwrap();

    assert_eq!(first, second);
}

#[test]
fn parameter_names_do_not_change_the_selector() {
    let args = [DynSolValue::Uint(U256::from(500), 256)];
    let with_name = encode_function_call(SET_FEE_SIGNATURE, &args).unwrap();
    let without_name = encode_function_call("setFeePercentage(uint256)", &args).unwrap();

    assert_eq!(with_name, without_name);
}

#[test]
fn rejects_malformed_signatures() {
    assert!(encode_function_call("not a signature", &[]).is_err());
    assert!(encode_function_call("setFeePercentage(uint256", &[]).is_err());
}

#[test]
fn rejects_mismatched_arguments() {
    // missing argument
    assert!(encode_function_call(SET_FEE_SIGNATURE, &[]).is_err());
    // extra argument
    assert!(encode_function_call(
        SET_FEE_SIGNATURE,
        &[
            DynSolValue::Uint(U256::from(500), 256),
            DynSolValue::Uint(U256::from(500), 256),
        ],
    )
    .is_err());
    // wrong type, must not be silently coerced
    assert!(
        encode_function_call(SET_FEE_SIGNATURE, &[DynSolValue::String("500".into())]).is_err()
    );
}

#[test]
fn returns_clause_does_not_change_the_selector() {
    let call_data = encode_function_call("feePercentage() returns (uint256)", &[]).unwrap();

    assert_eq!(call_data.len(), 4);
    assert_eq!(&call_data[..4], &keccak256("feePercentage()")[..4]);
}

#[test]
fn decodes_read_accessor_output() {
    let mut raw = [0u8; 32];
    raw[30] = 0x01;
    raw[31] = 0xf4;

    let values = decode_function_output("feePercentage() returns (uint256)", &raw).unwrap();
    assert_eq!(values, vec![DynSolValue::Uint(U256::from(500), 256)]);
}

#[test]
fn rejects_truncated_output() {
    assert!(decode_function_output("feePercentage() returns (uint256)", &[0u8; 16]).is_err());
}
