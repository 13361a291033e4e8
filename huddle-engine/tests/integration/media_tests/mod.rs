mod test_disconnect_drops_session;
mod test_track_rendered_once;
