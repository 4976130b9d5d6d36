//! Well-known setting keys.

use std::fmt;

macro_rules! setting_keys {
    ($($(#[$doc:meta])* $variant:ident => $name:literal,)*) => {
        /// Keys the application stores in its settings file.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SettingKey {
            $($(#[$doc])* $variant,)*
        }

        impl SettingKey {
            /// Every well-known key, in declaration order.
            pub const ALL: &'static [SettingKey] = &[$(Self::$variant,)*];

            /// Get the string stored in the settings file.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

setting_keys! {
    AdminDisplayName => "ADMINISTRATOR_DISPLAY_NAME",
    AdminName => "ADMINISTRATOR_NAME",
    AdminPassword => "ADMINISTRATOR_PASSWORD",
    AdminEmail => "ADMINISTRATOR_EMAIL",
    AdminsGroup => "ADMINISTRATORS_GROUP",
    /// Root folder for project data
    Storage => "TVB_STORAGE",
    UploadKeyPath => "UPLOAD_KEY_PATH",
    KeycloakConfiguration => "KEYCLOAK_CONFIGURATION",
    KeycloakWebConfiguration => "KEYCLOAK_WEB_CONFIGURATION",
    EnableKeycloakLogin => "ENABLE_KEYCLOAK_LOGIN",
    /// Per-user disk quota
    MaxDiskSpacePerUser => "USR_DISK_SPACE",
    ServerIp => "SERVER_IP",
    WebServerPort => "WEB_SERVER_PORT",
    SelectedDb => "SELECTED_DB",
    DbUrl => "URL_VALUE",
    MaxConnections => "MAX_CONNECTIONS",
    MaxAsyncConnections => "MAX_ASYNC_CONNECTIONS",
    UrlVersion => "URL_TVB_VERSION",
    DeployCluster => "DEPLOY_CLUSTER",
    ClusterScheduler => "CLUSTER_SCHEDULER",
    RunOnHpc => "RUN_ON_HPC",
    HpcSyncInterval => "HPC_SYNC_BACKGROUND_JOB_INTERVAL",
    CryptPassDir => "CRYPT_PASSDIR",
    CryptDataDir => "CRYPT_DATADIR",
    HpcComputeSite => "HPC_COMPUTE_SITE",
    MaxThreads => "MAXIMUM_NR_OF_THREADS",
    OperationBackgroundInterval => "OP_BACKGROUND_JOB_INTERVAL",
    MaxOpsInRange => "MAXIMUM_NR_OF_OPS_IN_RANGE",
    MaxSurfaceVertices => "MAXIMUM_NR_OF_VERTICES_ON_SURFACE",
    LastCheckedFileVersion => "LAST_CHECKED_FILE_VERSION",
    LastCheckedCodeVersion => "LAST_CHECKED_CODE_VERSION",
    FileStorageUpdateStatus => "FILE_STORAGE_UPDATE_STATUS",
    TraceUserActions => "TRACE_USER_ACTIONS",
    EncryptStorage => "ENCRYPT_STORAGE",
    DecryptPath => "DECRYPT_PATH",
    FileStorage => "FILE_STORAGE",
    OpenshiftDeploy => "OPENSHIFT_DEPLOY",
    OpenshiftNamespace => "OPENSHIFT_NAMESPACE",
    OpenshiftApplication => "OPENSHIFT_APPLICATION",
    ProcessingOperationsApplication => "PROCESSING_OPERATIONS_APPLICATION",
    DataEncryptionHandlerApplication => "DATA_ENCRYPTION_HANDLER_APPLICATION",
    DeployContext => "DEPLOY_CONTEXT",
    RestDeployContext => "REST_DEPLOY_CONTEXT",
    ElasticsearchApiKey => "ELASTICSEARCH_API_KEY",
    ElasticsearchUrl => "ELASTICSEARCH_URL",
    ElasticsearchLoggingIndex => "ELASTICSEARCH_LOGGING_INDEX",
    ElasticsearchRequestTimeout => "ELASTICSEARCH_REQUEST_TIMEOUT",
    ElasticsearchBufferThreshold => "ELASTICSEARCH_BUFFER_THRESHOLD",
}

impl SettingKey {
    /// Look up a well-known key by its stored name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }
}

impl AsRef<str> for SettingKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<SettingKey> for String {
    fn from(key: SettingKey) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
