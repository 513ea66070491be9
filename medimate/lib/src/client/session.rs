//! Scoped ownership of the async transport.

use std::ops::Deref;

use super::MediMate;

/// Borrows the client for a unit of async work and releases the async
/// transport when dropped, including when the work exits early through `?`.
///
/// ## Examples
///
/// ```rust,ignore
/// async fn morning_check(client: &mut MediMate) -> medimate::Result<()> {
///     let session = client.session();
///     session.health().send().await?;
///     session.cultural().supported_languages().send().await?;
///     Ok(())
/// } // transport released here, on success or error
/// ```
#[derive(Debug)]
pub struct AsyncSession<'a> {
    client: &'a mut MediMate,
}

impl<'a> AsyncSession<'a> {
    pub(crate) fn new(client: &'a mut MediMate) -> Self {
        Self { client }
    }
}

impl Deref for AsyncSession<'_> {
    type Target = MediMate;

    fn deref(&self) -> &MediMate {
        self.client
    }
}

impl Drop for AsyncSession<'_> {
    fn drop(&mut self) {
        self.client.close_async();
    }
}
