use crate::{transport::Transport, Error};

/// Exchange whatever credential we currently hold for a login token.
pub(crate) async fn get_login_token(
    transport: &Transport,
    person_id: u64,
) -> Result<String, Error> {
    let resource = format!("persons/{}/logintoken", person_id);
    let body = transport.get(&resource, true).await?;

    super::decode_data(&resource, &body)
}
