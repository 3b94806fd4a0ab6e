/*!
   Options customizing the relayer of a test, consumed once by
   [`RelayerFactory`](crate::relayer::factory::RelayerFactory) when the
   relayer is built.

   Option values are passive data and are not validated. An invalid image
   or start flag only surfaces as a failure when the relayer runs.
*/

use crate::docker::DockerImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayerOption {
    /// Run the relayer from this image instead of the default one.
    DockerImage(DockerImage),

    /// Whether to pull the relayer image before the test.
    ImagePull(bool),

    /// Flags appended verbatim to the `start` command of the relayer.
    ExtraStartFlags(Vec<String>),
}

pub type RelayerOptions = Vec<RelayerOption>;

/**
   Override the default relayer image. `uid_gid` is the `uid:gid` owner
   used within the container; root is assumed when it is empty.
*/
pub fn custom_docker_image(repository: &str, version: &str, uid_gid: &str) -> RelayerOption {
    RelayerOption::DockerImage(DockerImage::new(repository, version, uid_gid))
}

pub fn image_pull(pull: bool) -> RelayerOption {
    RelayerOption::ImagePull(pull)
}

/// Append additional flags when starting the relayer.
pub fn startup_flags(flags: &[&str]) -> RelayerOption {
    RelayerOption::ExtraStartFlags(flags.iter().map(|flag| flag.to_string()).collect())
}

/**
   The settings of a relayer after applying its options.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayerSettings {
    pub image: DockerImage,

    pub pull_image: bool,

    pub extra_start_flags: Vec<String>,
}

impl RelayerSettings {
    /**
       Fold the options over the given default image. The last image and
       the last pull toggle win, while start flags accumulate in order.
    */
    pub fn from_options(default_image: DockerImage, options: &[RelayerOption]) -> Self {
        let mut settings = Self {
            image: default_image,
            pull_image: true,
            extra_start_flags: Vec::new(),
        };

        for option in options {
            match option {
                RelayerOption::DockerImage(image) => settings.image = image.clone(),
                RelayerOption::ImagePull(pull) => settings.pull_image = *pull,
                RelayerOption::ExtraStartFlags(flags) => {
                    settings.extra_start_flags.extend(flags.iter().cloned())
                }
            }
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_image() -> DockerImage {
        DockerImage::new("ghcr.io/cosmos/relayer", "v2.3.1", "100:1000")
    }

    #[test]
    fn no_options_keep_defaults() {
        let settings = RelayerSettings::from_options(default_image(), &[]);

        assert_eq!(settings.image, default_image());
        assert!(settings.pull_image);
        assert!(settings.extra_start_flags.is_empty());
    }

    #[test]
    fn last_image_and_pull_win() {
        let options = vec![
            custom_docker_image("ghcr.io/cosmos/relayer", "v2.2.0", ""),
            image_pull(false),
            custom_docker_image("local/rly", "dev", "1000:1000"),
            image_pull(true),
            image_pull(false),
        ];

        let settings = RelayerSettings::from_options(default_image(), &options);

        assert_eq!(settings.image, DockerImage::new("local/rly", "dev", "1000:1000"));
        assert!(!settings.pull_image);
    }

    #[test]
    fn start_flags_accumulate_in_order() {
        let options = vec![
            startup_flags(&["-p", "events"]),
            image_pull(true),
            startup_flags(&["-b", "100"]),
        ];

        let settings = RelayerSettings::from_options(default_image(), &options);

        assert_eq!(settings.extra_start_flags, vec!["-p", "events", "-b", "100"]);
        assert_eq!(settings.image, default_image());
    }
}
