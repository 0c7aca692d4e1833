/*!
Superseded extension points kept callable for legacy plugins and themes
*/

pub mod header_extra_info;
