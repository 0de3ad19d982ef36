use rstest::rstest;
use servo_hardware::error::HwError;
use servo_hardware::output_name;

#[rstest]
#[case(1, "PWM0_OUT")]
#[case(2, "PWM1_OUT")]
fn maps_output_number_to_device_name(#[case] num: u8, #[case] expected: &str) {
    assert_eq!(output_name(num).unwrap(), expected);
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(255)]
fn rejects_outputs_outside_range(#[case] num: u8) {
    match output_name(num) {
        Err(HwError::UnknownOutput(n)) => assert_eq!(n, num),
        other => panic!("expected UnknownOutput, got {other:?}"),
    }
}
