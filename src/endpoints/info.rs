use crate::{transport::Transport, Error, ServerInfo};

const RESOURCE: &str = "info";

/// Ask the server which version of ChurchTools it is running. This doesn't
/// need any credentials.
pub(crate) async fn get_info(transport: &Transport) -> Result<ServerInfo, Error> {
    let body = transport.get(RESOURCE, false).await?;
    let info: ServerInfo = super::decode(RESOURCE, &body)?;
    log::trace!("Parsed response: {:#?}", info);

    Ok(info)
}
