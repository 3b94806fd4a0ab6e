use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};

/**
   A docker image reference, with the user that processes inside
   containers of the image should run as.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerImage {
    pub repository: String,

    pub version: String,

    /**
       The `uid:gid` the container processes run as. An empty string
       means the image default, which is usually root.
    */
    #[serde(default)]
    pub uid_gid: String,
}

impl DockerImage {
    pub fn new(repository: &str, version: &str, uid_gid: &str) -> Self {
        Self {
            repository: repository.to_string(),
            version: version.to_string(),
            uid_gid: uid_gid.to_string(),
        }
    }

    /// The `repository:version` reference understood by `docker pull`.
    pub fn reference(&self) -> String {
        if self.version.is_empty() {
            self.repository.clone()
        } else {
            format!("{}:{}", self.repository, self.version)
        }
    }

    pub fn user(&self) -> Option<&str> {
        if self.uid_gid.is_empty() {
            None
        } else {
            Some(&self.uid_gid)
        }
    }
}

impl Display for DockerImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference())
    }
}
