//! Token fixtures produced by Node's `crypto` module.
//!
//! Every token below was generated with
//! `createCipheriv("aes-128-cbc", key, randomBytes(16))` where `key` is the
//! first 32 hex characters of an HMAC-SHA256 keyed with `TEST_API_KEY`
//! over an empty message.
//! The plaintext of each token is the `JSON.stringify` output recorded in
//! the matching `*_JSON` constant.

/// API key all fixtures were encrypted under.
pub const TEST_API_KEY: &str = "test-api-key-for-assembly-kit-unit-tests";

/// Hex of the key derived from [`TEST_API_KEY`].
pub const TEST_DERIVED_KEY_HEX: &str = "32a64c7f79016a97bc667eb2f6a37c69";

/// Workspace id used by the fixtures.
pub const WORKSPACE_ID: &str = "ws-00000000-0000-0000-0000-000000000001";
/// Client id used by the fixtures.
pub const CLIENT_ID: &str = "cl-00000000-0000-0000-0000-000000000002";
/// Company id used by the fixtures.
pub const COMPANY_ID: &str = "co-00000000-0000-0000-0000-000000000003";
/// Internal user id used by the fixtures.
pub const INTERNAL_USER_ID: &str = "iu-00000000-0000-0000-0000-000000000004";
/// Token id used by the fixtures.
pub const TOKEN_ID: &str = "tk-00000000-0000-0000-0000-000000000005";
/// Base URL override used by the fixtures.
pub const BASE_URL: &str = "https://staging-api.assembly.com";

/// Plaintext of [`CLIENT_TOKEN`].
pub const CLIENT_JSON: &str = r#"{"clientId":"cl-00000000-0000-0000-0000-000000000002","companyId":"co-00000000-0000-0000-0000-000000000003","workspaceId":"ws-00000000-0000-0000-0000-000000000001"}"#;
/// Client-scoped token.
pub const CLIENT_TOKEN: &str = "a57c146ed7b10017a1889e4ae7587a05c5667ec9d0442178d24ea53da4e2872d70818ab7bb1926a539bb3c77c2afcc4afadbc32eaf8819e0444f80e38e59f83565bf86daff7c02c89c6507a1d7be7abf87f330be4cf1450ad3c7dfa52552794368070ef6f31e290e6f1f0082f16cc210b336389754bc770f2c0154fb08b9c59b104cef5086ae4c941eda14894ca0c9834269b359f73d066a2bc0f0375d80796a178b0a89306b8e723c4ae409d46afe8bf7237adda691f04431b76c9ab5a811ea";

/// Plaintext of [`INTERNAL_USER_TOKEN`].
pub const INTERNAL_USER_JSON: &str = r#"{"internalUserId":"iu-00000000-0000-0000-0000-000000000004","workspaceId":"ws-00000000-0000-0000-0000-000000000001"}"#;
/// Internal-user token.
pub const INTERNAL_USER_TOKEN: &str = "50b70fcd75fdb58264e117ad9b6280d710f81f6891c5349654f37251e474e80b1e2abaec9d36afd14811f36ff0f6fd3edd516398c0ed80e58e4efb20cf0c09c27d891ef8dc73953b16e3cfc4a1897fccdedb40c17a4a848e1a8ba6a9163f941991c93e6deb08bad03273136052161ee7f50e675b85e4b0d5fa8b301c0e3d4c2ced7740eda2ba2a462564fc6a91442e12";

/// Plaintext of [`TOKEN_ID_TOKEN`].
pub const TOKEN_ID_JSON: &str = r#"{"clientId":"cl-00000000-0000-0000-0000-000000000002","companyId":"co-00000000-0000-0000-0000-000000000003","tokenId":"tk-00000000-0000-0000-0000-000000000005","workspaceId":"ws-00000000-0000-0000-0000-000000000001"}"#;
/// Client token carrying a token id.
pub const TOKEN_ID_TOKEN: &str = "f6d51051a09d020f86d4f369b41d7d7ecb88c6003fc366d6db3e3d2ea7f7af55c8857baf06fbacf985497035cde0850d6cbe5ffd0868bf979e2df001b50a2a5696ab607589fc3a07de15fb06454994ef76925bb210edfd6e29f8c6fa6b61a2df800acec7493ba5a777fb40f720549108bb7055da1a3379de12044f5b2d2c45d41bbff1b5a0370cfce1142f45fb7e2d980326339fd78d79b932a15709158acf0cfd61dfdf997d8c52c5bc24759906cd62c20d0d80925455d68e04192788aed9bbb83f70ae507880e5757835ba6c1057b1b3ce0cd78fa3a1026a0ea2713d3ade89e2659c6f1e4330f66bdea23266758272";

/// Plaintext of [`BASE_URL_TOKEN`].
pub const BASE_URL_JSON: &str = r#"{"baseUrl":"https://staging-api.assembly.com","internalUserId":"iu-00000000-0000-0000-0000-000000000004","workspaceId":"ws-00000000-0000-0000-0000-000000000001"}"#;
/// Internal-user token carrying a base URL override.
pub const BASE_URL_TOKEN: &str = "697b0b7012ab02c47b963c329a169679df3c9f178e55823fe5c821bc5ed5d856b904ec9b9cc9b1fbf9627ae36dbad99d4b648961215a2a4013b7ffcb4e3fa9bfce77450ae0ce622d2d7b7ac073fe5f63065415ccca50cc11bf4d161db139d1f1b08cd1b6f2f8bc0e9596cdb2fd30b3588e35d6894683727b91a3a6d8ff312b3b6c1d78db84b3deac2cdaaa9627dc6a503112d43b5feec7c421e683baeaaa37ffe95246c88349725e566edd56dbea287c4eca9b14afa6e6e713f18fc67698353b";

/// Plaintext of [`BLOCK_ALIGNED_TOKEN`]; exactly 128 bytes long.
pub const BLOCK_ALIGNED_JSON: &str = r#"{"internalUserId":"iu-00000000-0000-0000-0000-000000000004","workspaceId":"ws-00000000-0000-0000-0000-000000000001xxxxxxxxxxxx"}"#;
/// Token whose plaintext is a multiple of the cipher block size.
pub const BLOCK_ALIGNED_TOKEN: &str = "f7ae0c352caa669654f22edb1d751aa15de81b9ec3509add8e2da0e7a6b0284de956b9a28eb14147698a0f1c9cabcd89e4ccb2119e6cc0952cb3eab95e80b53afd2d05dd83c13ef6c3284b02765ec1860c8ad54ed5e04b31bba44895a998560f1bb45b742ff31207344dc9bb737bfb43e7758a3bb8aae511332c1fae0f4250c759d38b22b165695535e6d51a6cd606e064b45824f86c2b8567a7baf3f59ba825";

/// Plaintext of [`UNKNOWN_FIELD_TOKEN`].
pub const UNKNOWN_FIELD_JSON: &str = r#"{"internalUserId":"iu-00000000-0000-0000-0000-000000000004","workspaceId":"ws-00000000-0000-0000-0000-000000000001","futureField":"ignored"}"#;
/// Internal-user token with a field the schema does not know.
pub const UNKNOWN_FIELD_TOKEN: &str = "3868ba64fbc21830b51c7794e6eba59de9c6aec3e5413061b687eb135ab42e5a7b060ddd2ecd9d4a29abcb0a1315a4014abd25445495245b3e109367ad8bc97231e6675a4056e12bba6abbd961db372dcd878fae1851dd44316ef343d109eeef7488b2d57703bc9c6ddc7ad03b9c511c96c01f77bd667bc5c8196322ec6f3d2be042f4e7b98eca76ad70ad4426b20f6e08841293c5cb0d599da3b2abb795e193";

/// Plaintext of [`NOT_JSON_TOKEN`].
pub const NOT_JSON_PLAINTEXT: &str = "definitely not json";
/// Token whose plaintext is not JSON.
pub const NOT_JSON_TOKEN: &str = "96b9657aa33a1e179f41a86ef704c2546bfdd2b2020e29c921b59d3ccf7722e6b8f7f63a715a05099f208d2fd4a6af37";

/// Plaintext of [`MISSING_SCOPE_TOKEN`].
pub const MISSING_SCOPE_JSON: &str = r#"{"clientId":"cl-00000000-0000-0000-0000-000000000002","workspaceId":"ws-00000000-0000-0000-0000-000000000001"}"#;
/// Token with a client id but no company id or internal user id.
pub const MISSING_SCOPE_TOKEN: &str = "1f7149028693d4bdbd722bc9af4ff6e711826d68c65ed4b7c3ebabd38b243c3da08bbe142203b9df59d696f5b36fff047b8b3f3e8dd9f3cc05b90bee6e095cce8aaa6dc1da269c8fc215bd94f27e24f55b22a73387ad36a459cc32fdb81a1b6a5710a25919a8f95de7ee36099fb1ba6e9cbcd201d2059a4271870cb7e1b02243";

/// Short API key used by the client session fixture.
pub const SESSION_API_KEY: &str = "k1";
/// Hex of the key derived from [`SESSION_API_KEY`].
pub const SESSION_DERIVED_KEY_HEX: &str = "e6f06a89ac679df9f3f5774369cac0d5";
/// Plaintext of [`SESSION_CLIENT_TOKEN`].
pub const SESSION_CLIENT_JSON: &str = r#"{"clientId":"c1","companyId":"co1","workspaceId":"ws1"}"#;
/// Client token for workspace `ws1` encrypted under [`SESSION_API_KEY`].
pub const SESSION_CLIENT_TOKEN: &str = "e581cd592fd7f4021e52cd55399584dee8af47ff988541ae12d13ac7e0011c28fbbb54314b3f5735e131e5bbf7964ba2949dc367dcd28f86d3f989e5a171894a5d995be5e51958aff6b69eaa33940a51";

/// Every fixture token paired with its plaintext.
pub const ALL_TOKENS: &[(&str, &str)] = &[
    (CLIENT_TOKEN, CLIENT_JSON),
    (INTERNAL_USER_TOKEN, INTERNAL_USER_JSON),
    (TOKEN_ID_TOKEN, TOKEN_ID_JSON),
    (BASE_URL_TOKEN, BASE_URL_JSON),
    (BLOCK_ALIGNED_TOKEN, BLOCK_ALIGNED_JSON),
    (UNKNOWN_FIELD_TOKEN, UNKNOWN_FIELD_JSON),
    (NOT_JSON_TOKEN, NOT_JSON_PLAINTEXT),
    (MISSING_SCOPE_TOKEN, MISSING_SCOPE_JSON),
];
