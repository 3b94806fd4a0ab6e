/*!
   Helper functions for setting up test cases in an imperative way.

   Normal test authors should have no need to call [`init`] and
   [`docker`] directly, as they are implicitly called by the
   [`framework`](crate::framework) constructs. Test users are funded
   explicitly by the test through [`users`].
*/

pub mod docker;
pub mod init;
pub mod users;
