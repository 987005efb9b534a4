pub mod payment_sdk_mock;
