//! Canned models for common test scenarios.

use super::ModelFixture;

/// The token-issuing service with its real operation set.
pub fn sts_fixture() -> ModelFixture {
    ModelFixture::service("com.amazonaws.sts#AWSSecurityTokenServiceV20110615")
        .sdk_id("STS")
        .signed()
        .operation("AssumeRole")
        .operation("AssumeRoleWithSAML")
        .operation("AssumeRoleWithWebIdentity")
        .operation("DecodeAuthorizationMessage")
        .operation("GetAccessKeyInfo")
        .operation("GetCallerIdentity")
        .operation("GetFederationToken")
        .operation("GetSessionToken")
}

/// JSON AST for [`sts_fixture`].
pub fn sts_model() -> String {
    sts_fixture().to_json()
}

/// A signed service where every operation needs auth.
pub fn signed_fixture() -> ModelFixture {
    ModelFixture::service("com.amazonaws.fsx#AWSSimbaAPIService_v20180301")
        .sdk_id("FSx")
        .signed()
        .operation("CreateBackup")
        .operation("DeleteBackup")
        .operation("DescribeBackups")
}

/// A signed service where only some operations need auth.
pub fn mixed_optional_fixture() -> ModelFixture {
    ModelFixture::service("com.amazonaws.cognitoidentity#AWSCognitoIdentityService")
        .sdk_id("Cognito Identity")
        .signed()
        .operation("CreateIdentityPool")
        .optional_operation("GetCredentialsForIdentity")
        .optional_operation("GetId")
        .operation("ListIdentityPools")
}

/// A signed service where no operation needs auth.
pub fn all_optional_fixture() -> ModelFixture {
    ModelFixture::service("com.amazonaws.ssooidc#AWSSSOOIDCService")
        .sdk_id("SSO OIDC")
        .signed()
        .optional_operation("CreateToken")
        .optional_operation("RegisterClient")
}

/// A service without SigV4.
pub fn unsigned_fixture() -> ModelFixture {
    ModelFixture::service("example.weather#Weather")
        .operation("GetForecast")
        .optional_operation("Ping")
}

/// A signed service with no operations at all.
pub fn empty_signed_fixture() -> ModelFixture {
    ModelFixture::service("example.empty#Empty")
        .sdk_id("Empty")
        .signed()
}
