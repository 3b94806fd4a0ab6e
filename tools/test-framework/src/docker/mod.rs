/*!
   Thin wrappers around the `docker` command line, used to provision the
   chain nodes and relayers of a test.

   All containers, volumes and networks created through this module are
   owned by guard types that remove them when dropped, so that a failing
   test does not leave dangling resources behind. Set `KEEP_CONTAINERS=1`
   to keep them around for inspection.
*/

pub mod cli;
pub mod container;
pub mod image;
pub mod network;
pub mod volume;

pub use cli::Docker;
pub use container::{Container, ContainerSpec};
pub use image::DockerImage;
pub use network::DockerNetwork;
pub use volume::Volume;
