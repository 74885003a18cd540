// The same page as `path_info`, minus the debug block and the POST body.
pub fn main() {
    cgi_introspect::main(cgi_introspect::path_info::plain_handler)
}
